//! Bearer tokens for the Google APIs.
//!
//! Minting tokens (service account keys, OAuth flows) happens outside the
//! crate. A [`TokenSource`] only hands over an already valid access token.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// Environment variable read by [`token_from_env`].
pub const TOKEN_ENV_VAR: &str = "SLIDESMITH_ACCESS_TOKEN";

/// Provides the bearer token attached to every call.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Result<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn token(&self) -> Result<String> {
        (**self).token()
    }
}

/// A fixed token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::AuthFailure("access token is empty".into()));
        }
        Ok(Self(token))
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

// Keep the secret out of logs.
impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(..)")
    }
}

/// A token kept in a file, re-read on every call so an external refresher
/// can rotate it during a run.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSource for TokenFile {
    // Blocking read on the calling task; one small file per request.
    fn token(&self) -> Result<String> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::AuthFailure(format!("cannot read token file {}: {}", self.path.display(), e))
        })?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(Error::AuthFailure(format!(
                "token file {} is empty",
                self.path.display()
            )));
        }
        Ok(token.to_string())
    }
}

/// Token from [`TOKEN_ENV_VAR`], if set and non-empty.
pub fn token_from_env() -> Option<StaticToken> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .and_then(|value| StaticToken::new(value).ok())
}
