//! Session-level settings.
//!
//! Everything has a sensible default, so `ChatConfig::default()` is a working
//! configuration. [`ChatConfig::from_env`] lets deployments override the
//! defaults without recompiling:
//!
//! | Variable                     | Field           |
//! |------------------------------|-----------------|
//! | `VANILLA_CHAT_MODEL`         | `model`         |
//! | `VANILLA_CHAT_TEMPERATURE`   | `temperature`   |
//! | `VANILLA_CHAT_CONTEXT_TURNS` | `context_turns` |
//! | `VANILLA_CHAT_MAX_HISTORY`   | `max_history`   |
use std::{env, str::FromStr};

use crate::{
    error::{ChatError, Result},
    model::Model,
    request::{DEFAULT_CONTEXT_TURNS, DEFAULT_TEMPERATURE},
};

pub const ENV_MODEL: &str = "VANILLA_CHAT_MODEL";
pub const ENV_TEMPERATURE: &str = "VANILLA_CHAT_TEMPERATURE";
pub const ENV_CONTEXT_TURNS: &str = "VANILLA_CHAT_CONTEXT_TURNS";
pub const ENV_MAX_HISTORY: &str = "VANILLA_CHAT_MAX_HISTORY";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub model: Model,
    pub temperature: f64,
    /// Prior turns replayed with each prompt.
    pub context_turns: usize,
    /// Retention limit for the stored history; `None` keeps everything.
    pub max_history: Option<usize>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
            context_turns: DEFAULT_CONTEXT_TURNS,
            max_history: None,
        }
    }
}

impl ChatConfig {
    /// Defaults overridden by the `VANILLA_CHAT_*` environment variables.
    ///
    /// # Errors
    ///
    /// * [`ChatError::Invalid`] – if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = Model::from(model.trim().to_owned());
        }
        if let Some(raw) = lookup(ENV_TEMPERATURE) {
            config.temperature = parse_var(ENV_TEMPERATURE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONTEXT_TURNS) {
            config.context_turns = parse_var(ENV_CONTEXT_TURNS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_HISTORY) {
            config.max_history = Some(parse_var(ENV_MAX_HISTORY, &raw)?);
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_context_turns(mut self, context_turns: usize) -> Self {
        self.context_turns = context_turns;
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ChatError::Invalid(format!("`{key}`={raw:?}: {e}")))
}
