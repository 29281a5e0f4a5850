use std::fmt::{Debug, Formatter};

use vzaar_core::utils::Redact;

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://vzaar.com/";

/// Config carries everything the client needs to talk to the API.
///
/// Loaded once by the caller and read-only afterwards; there is no ambient
/// configuration lookup anywhere in the client.
#[derive(Clone)]
pub struct Config {
    /// Account API token, sent as the OAuth token on signed calls.
    pub token: Option<String>,
    /// Signing secret paired with the token.
    pub secret: Option<String>,
    /// Request upload policies optimized for flash playback.
    pub flash_support: bool,
    /// Base URL of the API, trailing slash included.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            secret: None,
            flash_support: false,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set flash_support
    pub fn with_flash_support(mut self, flash_support: bool) -> Self {
        self.flash_support = flash_support;
        self
    }

    /// Set api_url
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(Redact::from))
            .field("secret", &self.secret.as_ref().map(Redact::from))
            .field("flash_support", &self.flash_support)
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new()
            .with_token("token-value-long")
            .with_secret("secret-value-long");

        let out = format!("{config:?}");
        assert!(!out.contains("token-value-long"));
        assert!(!out.contains("secret-value-long"));
        assert!(out.contains(DEFAULT_API_URL));
    }
}
