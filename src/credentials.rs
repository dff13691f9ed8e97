use std::collections::HashMap;

/// Configuration key holding the API token
pub const API_KEY: &str = "api.key";

/// Read-only source of credentials
pub trait CredentialProvider: Send + Sync {
    /// Look up a value by key
    fn get(&self, key: &str) -> Option<String>;
}

impl CredentialProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Explicit values (command line, environment) layered over a fallback provider
#[derive(Debug, Clone)]
pub struct LayeredCredentials<P> {
    overrides: HashMap<String, String>,
    fallback: P,
}

impl<P: CredentialProvider> LayeredCredentials<P> {
    pub fn new(fallback: P) -> Self {
        Self {
            overrides: HashMap::new(),
            fallback,
        }
    }

    /// Override `key` when `value` is present and not blank
    pub fn with_override(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.overrides.insert(key.to_string(), value);
        }
        self
    }
}

impl<P: CredentialProvider> CredentialProvider for LayeredCredentials<P> {
    fn get(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.fallback.get(key))
    }
}
