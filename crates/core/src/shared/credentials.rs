use std::fmt;

use thiserror::Error;

use crate::shared::constants::{INTERNATIONAL_HOST, MAINLAND_CHINA_HOST};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key must not be empty")]
    EmptyKey,
    #[error("API secret must not be empty")]
    EmptySecret,
    #[error("default group label must not be empty")]
    EmptyGroupLabel,
}

/// Which regional deployment of the service to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    International,
    MainlandChina,
}

impl Region {
    pub fn host(self) -> &'static str {
        match self {
            Region::International => INTERNATIONAL_HOST,
            Region::MainlandChina => MAINLAND_CHINA_HOST,
        }
    }
}

/// URL scheme. Plain HTTP is the default; production callers should opt into TLS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// API key and secret pair, validated non-empty at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        let secret = secret.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self { key, secret })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

// Keeps the secret out of debug logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}
