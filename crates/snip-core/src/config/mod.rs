//! Supabase endpoint configuration.
//!
//! The extension build ships with a project URL and anon key; both are public
//! values, never secrets. Clients resolve them from explicit values or from
//! the environment.

use std::env;

use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Supabase URL must not be empty")]
    MissingUrl,
    #[error("Supabase anon key must not be empty")]
    MissingAnonKey,
    #[error("Supabase URL must include http:// or https://")]
    UrlScheme,
    #[error("SUPABASE_URL and SUPABASE_ANON_KEY must be set together")]
    PartialEnvironment,
}

/// Resolved Supabase project endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    base_url: String,
    anon_key: String,
}

impl SupabaseConfig {
    /// Build a configuration from a project URL and anon key.
    ///
    /// The URL is trimmed, must carry an HTTP scheme, and may be given with or
    /// without a trailing slash or `/auth/v1` suffix.
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url =
            normalize_text_option(Some(url.as_ref().to_string())).ok_or(ConfigError::MissingUrl)?;
        if !is_http_url(&base_url) {
            return Err(ConfigError::UrlScheme);
        }
        let base_url = base_url.trim_end_matches('/');
        let base_url = base_url.strip_suffix("/auth/v1").unwrap_or(base_url);

        let anon_key =
            normalize_text_option(Some(anon_key.into())).ok_or(ConfigError::MissingAnonKey)?;

        Ok(Self {
            base_url: base_url.to_string(),
            anon_key,
        })
    }

    /// Resolve configuration from `SUPABASE_URL`/`SUPABASE_ANON_KEY`.
    ///
    /// Returns `Ok(None)` when neither variable is set; setting only one of
    /// the two is an error.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_optional(
            env::var(ENV_SUPABASE_URL).ok(),
            env::var(ENV_SUPABASE_ANON_KEY).ok(),
        )
    }

    /// Resolve configuration from a pair of optional values.
    pub fn from_optional(
        url: Option<String>,
        anon_key: Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        match (normalize_text_option(url), normalize_text_option(anon_key)) {
            (None, None) => Ok(None),
            (Some(url), Some(anon_key)) => Self::new(url, anon_key).map(Some),
            _ => Err(ConfigError::PartialEnvironment),
        }
    }

    /// GoTrue auth API root, e.g. `https://project.supabase.co/auth/v1`.
    #[must_use]
    pub fn auth_endpoint(&self) -> String {
        format!("{}/auth/v1", self.base_url)
    }

    /// PostgREST API root, e.g. `https://project.supabase.co/rest/v1`.
    #[must_use]
    pub fn rest_endpoint(&self) -> String {
        format!("{}/rest/v1", self.base_url)
    }

    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}
