//! Console configuration: backend endpoints, token storage key, console variant.
//!
//! Native shells read the process environment; the WASM bundle reads values
//! baked in at compile time. Both paths go through [`ConsoleConfig::from_lookup`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:9096/query";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "http://localhost:9096/login";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown console variant `{0}` (expected `tenant` or `admin`)")]
    InvalidVariant(String),
}

/// Which console deployment is being served. Selects the route table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsoleVariant {
    /// Customer-facing console: customers, users, devices.
    #[default]
    Tenant,
    /// Operator console: organizations, users, things.
    Admin,
}

impl ConsoleVariant {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tenant" => Ok(Self::Tenant),
            "admin" => Ok(Self::Admin),
            _ => Err(ConfigError::InvalidVariant(raw.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub graphql_endpoint: String,
    pub login_endpoint: String,
    pub token_storage_key: String,
    pub variant: ConsoleVariant,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_owned(),
            login_endpoint: DEFAULT_LOGIN_ENDPOINT.to_owned(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_owned(),
            variant: ConsoleVariant::default(),
        }
    }
}

impl ConsoleConfig {
    /// Build config from an arbitrary key lookup.
    ///
    /// Keys:
    /// - `PIOT_GRAPHQL_ENDPOINT`: default `http://localhost:9096/query`
    /// - `PIOT_LOGIN_ENDPOINT`: default `http://localhost:9096/login`
    /// - `PIOT_TOKEN_KEY`: default `token`
    /// - `PIOT_CONSOLE_VARIANT`: `tenant` (default) or `admin`
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariant`] for an unrecognized variant name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        let variant = match get("PIOT_CONSOLE_VARIANT") {
            Some(raw) => ConsoleVariant::parse(&raw)?,
            None => defaults.variant,
        };

        Ok(Self {
            graphql_endpoint: get("PIOT_GRAPHQL_ENDPOINT").unwrap_or(defaults.graphql_endpoint),
            login_endpoint: get("PIOT_LOGIN_ENDPOINT").unwrap_or(defaults.login_endpoint),
            token_storage_key: get("PIOT_TOKEN_KEY").unwrap_or(defaults.token_storage_key),
            variant,
        })
    }

    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ConsoleConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`ConsoleConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "PIOT_GRAPHQL_ENDPOINT" => option_env!("PIOT_GRAPHQL_ENDPOINT"),
                "PIOT_LOGIN_ENDPOINT" => option_env!("PIOT_LOGIN_ENDPOINT"),
                "PIOT_TOKEN_KEY" => option_env!("PIOT_TOKEN_KEY"),
                "PIOT_CONSOLE_VARIANT" => option_env!("PIOT_CONSOLE_VARIANT"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}
