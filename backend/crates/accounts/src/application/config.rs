//! Application Configuration
//!
//! Configuration for the accounts application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Token lifetime; the `exp` claim is issue time plus this
    pub token_expiry: Duration,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            token_expiry: Duration::from_secs(24 * 3600), // 24 hours
        }
    }
}

impl AccountsConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Build the cookie configuration for the session carrier
    ///
    /// Max-Age mirrors the token lifetime so the browser drops the cookie
    /// around the time the token stops verifying.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_expiry.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_and_secure() {
        let config = AccountsConfig::default();
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert!(config.cookie_secure);
        assert_eq!(config.token_expiry, Duration::from_secs(86400));
    }

    #[test]
    fn test_cookie_config_carries_expiry() {
        let config = AccountsConfig::default();
        let cookie = config.cookie_config();
        assert_eq!(cookie.name, "session");
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age_secs, Some(86400));
    }

    #[test]
    fn test_development_is_insecure() {
        let config = AccountsConfig::development();
        assert!(!config.cookie_secure);
    }
}
