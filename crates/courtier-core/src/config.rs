//! Backend connection configuration
//!
//! The pipeline never reads ambient global state: every component receives
//! the base URL and the optional session token explicitly, so tests can
//! inject their own. `Config::from_env` is the one place environment
//! variables are consulted.

use crate::error::{Error, Result};

/// Environment variable naming the CRM backend base URL
pub const BACKEND_URL_ENV: &str = "COURTIER_BACKEND_URL";
/// Environment variable carrying the optional bearer token
pub const API_TOKEN_ENV: &str = "COURTIER_API_TOKEN";

/// Connection settings for the CRM backend
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Session token; requests proceed unauthenticated when absent
    pub token: Option<String>,
}

impl Config {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    /// Read configuration from the environment
    ///
    /// A missing base URL fails the attempted operation before any network
    /// call; a missing token is tolerated.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BACKEND_URL_ENV).map_err(|_| Error::MissingConfig(BACKEND_URL_ENV))?;
        let token = std::env::var(API_TOKEN_ENV).ok();
        Ok(Self::new(&base_url, token.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config::new("http://crm.local/", None);
        assert_eq!(config.base_url, "http://crm.local");
    }

    #[test]
    fn token_is_optional() {
        let config = Config::new("http://crm.local", Some("jwt"));
        assert_eq!(config.token.as_deref(), Some("jwt"));
        let config = Config::new("http://crm.local", None);
        assert!(config.token.is_none());
    }
}
