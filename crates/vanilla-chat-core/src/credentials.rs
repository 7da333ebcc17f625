//! Where the API key lives.
//!
//! How keys are persisted is up to the host application; the client only
//! needs to read the current key before each request and to forget it on
//! logout.
use std::sync::RwLock;

pub trait CredentialStore: Send + Sync {
    /// Current API key, if any.
    fn api_key(&self) -> Option<String>;

    /// Remove the stored key. Later requests fail as unauthorized until a
    /// new key is set.
    fn clear(&self);
}

/// Process-local store, optionally seeded with a key.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    key: RwLock<Option<String>>,
}

impl InMemoryCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(api_key.into())),
        }
    }

    pub fn set(&self, api_key: impl Into<String>) {
        let mut guard = self.key.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(api_key.into());
    }
}

impl CredentialStore for InMemoryCredentials {
    fn api_key(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|k| !k.is_empty())
    }

    fn clear(&self) {
        let mut guard = self.key.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}
