//! Provider-agnostic building blocks of the **vanilla-chat** client:
//! conversation history, request building, lifecycle hooks, the session
//! object that ties them together, and the unified error type.
pub mod config;
pub mod credentials;
pub mod error;
pub mod generic;
pub mod history;
pub mod model;
pub mod observer;
pub mod provider;
pub mod request;
pub mod session;

pub use session::ChatSession;
