//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API keys never leak through logs, debug
//! output, or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret for the moment of use (e.g. an auth header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An LLM provider API key, possibly absent.
///
/// Absence is a supported state, not an error: the pipeline runs in
/// demo mode without a key. Template values left over from an `.env`
/// example (anything containing `your`, like `your_openai_api_key_here`)
/// count as absent.
#[derive(Clone)]
pub struct ProviderCredentials {
    api_key: Option<SecretString>,
}

impl ProviderCredentials {
    /// Credentials with a key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key)),
        }
    }

    /// Credentials without a key (demo mode).
    pub fn unconfigured() -> Self {
        Self { api_key: None }
    }

    /// Read a key from the environment, treating unset and blank alike.
    pub fn from_env(var: &str) -> Self {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Self::unconfigured(),
        }
    }

    /// Whether this key can actually authenticate a request.
    ///
    /// False when absent, blank, or a placeholder from an env template.
    pub fn is_usable(&self) -> bool {
        match &self.api_key {
            Some(key) => {
                let value = key.expose();
                !value.trim().is_empty() && !value.contains("your")
            }
            None => false,
        }
    }

    /// Expose the key when usable.
    pub fn usable_key(&self) -> Option<&SecretString> {
        if self.is_usable() {
            self.api_key.as_ref()
        } else {
            None
        }
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("sk-super-secret-key");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = SecretString::new("sk-super-secret-key");
        assert_eq!(secret.expose(), "sk-super-secret-key");
    }

    #[test]
    fn test_real_key_is_usable() {
        assert!(ProviderCredentials::new("sk-proj-abc123").is_usable());
    }

    #[test]
    fn test_absent_and_blank_keys_are_unusable() {
        assert!(!ProviderCredentials::unconfigured().is_usable());
        assert!(!ProviderCredentials::new("").is_usable());
        assert!(!ProviderCredentials::new("   ").is_usable());
    }

    #[test]
    fn test_placeholder_key_is_unusable() {
        assert!(!ProviderCredentials::new("your_openai_api_key_here").is_usable());
        assert!(!ProviderCredentials::new("paste-your-key").is_usable());
    }

    #[test]
    fn test_usable_key_gates_on_usability() {
        let configured = ProviderCredentials::new("sk-proj-abc123");
        assert!(configured.usable_key().is_some());

        let placeholder = ProviderCredentials::new("your_key");
        assert!(placeholder.usable_key().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = ProviderCredentials::new("sk-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
