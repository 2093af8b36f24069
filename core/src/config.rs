//! Connection settings for `GeoServerClient`.

use std::fmt;
use std::time::Duration;

use crate::compat::ServerCompat;
use crate::error::ApiError;

/// Where the server lives and how to talk to it.
///
/// `base_url` points at the GeoServer web application (for example
/// `http://localhost:8080/geoserver`); the REST root `rest/` is appended.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<Duration>,
    pub compat: ServerCompat,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
            timeout: None,
            compat: ServerCompat::default(),
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_compat(mut self, compat: ServerCompat) -> Self {
        self.compat = compat;
        self
    }

    /// Read settings from `GEOSERVER_*` environment variables.
    ///
    /// `GEOSERVER_URL` is required. `GEOSERVER_USERNAME` and
    /// `GEOSERVER_PASSWORD` are only used together.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("GEOSERVER_URL")
            .ok_or_else(|| ApiError::Configuration("GEOSERVER_URL is not set".to_string()))?;
        let mut config = Self::new(&base_url);

        if let (Some(user), Some(password)) = (lookup("GEOSERVER_USERNAME"), lookup("GEOSERVER_PASSWORD")) {
            config = config.with_credentials(user, password);
        }
        if let Some(secs) = lookup("GEOSERVER_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ApiError::Configuration(format!("GEOSERVER_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(compat) = lookup("GEOSERVER_COMPAT") {
            config = config.with_compat(compat.parse()?);
        }
        Ok(config)
    }
}

// Keep the password out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("compat", &self.compat)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:8080/geoserver/");
        assert_eq!(config.base_url, "http://localhost:8080/geoserver");
    }

    #[test]
    fn from_env_requires_url() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(msg) if msg.contains("GEOSERVER_URL")));
    }

    #[test]
    fn from_env_reads_all_settings() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GEOSERVER_URL", "http://gs:8080/geoserver"),
            ("GEOSERVER_USERNAME", "admin"),
            ("GEOSERVER_PASSWORD", "geoserver"),
            ("GEOSERVER_TIMEOUT_SECS", "30"),
            ("GEOSERVER_COMPAT", "lenient"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://gs:8080/geoserver");
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("geoserver"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.compat, ServerCompat::Lenient);
    }

    #[test]
    fn from_env_ignores_username_without_password() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("GEOSERVER_URL", "http://gs:8080/geoserver"),
            ("GEOSERVER_USERNAME", "admin"),
        ]))
        .unwrap();
        assert!(config.username.is_none());
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("GEOSERVER_URL", "http://gs:8080/geoserver"),
            ("GEOSERVER_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig::new("http://gs").with_credentials("admin", "s3cret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
