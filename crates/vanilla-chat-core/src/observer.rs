//! Lifecycle hooks a host application implements to follow a request.
//!
//! For one request the calls arrive in this order:
//!
//! ```text
//! on_message(acc) × n  ──►  on_complete(final)      (success)
//! on_message(acc) × n  ──►  on_error(err)           (transport failure)
//! ```
//!
//! `on_complete` fires at most once per request, and never together with
//! `on_error`.
use crate::error::ChatError;

pub trait ChatObserver {
    /// Called with the full accumulated text after every content update.
    fn on_message(&mut self, _accumulated: &str) {}

    /// Called exactly once when a request finishes successfully.
    fn on_complete(&mut self, _final_text: &str) {}

    /// Called when the request failed. The default surfaces the message
    /// through the error log.
    fn on_error(&mut self, error: &ChatError) {
        tracing::error!("{error}");
    }
}

/// Observer that only keeps the default error reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultObserver;

impl ChatObserver for DefaultObserver {}

/// Closure-backed observer for callers that do not want a dedicated type.
///
/// ```rust
/// use vanilla_chat_core::observer::{ChatObserver, FnObserver};
///
/// let mut seen = Vec::new();
/// {
///     let mut observer = FnObserver::new().with_message(|text: &str| seen.push(text.to_owned()));
///     observer.on_message("He");
///     observer.on_message("Hello");
/// }
/// assert_eq!(seen, ["He", "Hello"]);
/// ```
#[allow(clippy::type_complexity)]
#[derive(Default)]
pub struct FnObserver<'a> {
    message: Option<Box<dyn FnMut(&str) + Send + 'a>>,
    complete: Option<Box<dyn FnMut(&str) + Send + 'a>>,
    error: Option<Box<dyn FnMut(&ChatError) + Send + 'a>>,
}

impl<'a> FnObserver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, f: impl FnMut(&str) + Send + 'a) -> Self {
        self.message = Some(Box::new(f));
        self
    }

    pub fn with_complete(mut self, f: impl FnMut(&str) + Send + 'a) -> Self {
        self.complete = Some(Box::new(f));
        self
    }

    pub fn with_error(mut self, f: impl FnMut(&ChatError) + Send + 'a) -> Self {
        self.error = Some(Box::new(f));
        self
    }
}

impl ChatObserver for FnObserver<'_> {
    fn on_message(&mut self, accumulated: &str) {
        if let Some(f) = self.message.as_mut() {
            f(accumulated);
        }
    }

    fn on_complete(&mut self, final_text: &str) {
        if let Some(f) = self.complete.as_mut() {
            f(final_text);
        }
    }

    fn on_error(&mut self, error: &ChatError) {
        match self.error.as_mut() {
            Some(f) => f(error),
            None => tracing::error!("{error}"),
        }
    }
}
