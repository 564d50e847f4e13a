//! Account credentials for the HTML/CSS to Image API.
//!
//! Requests authenticate with HTTP basic auth using the account's user id and API key. The API
//! key doubles as the HMAC secret for signed template URLs, so it is held as a [`SecretString`]
//! and never shows up in `Debug` output.

use std::env;

use secrecy::{ExposeSecret as _, SecretString};

use crate::Result;
use crate::error::Error;

/// Environment variable consulted for the user id when none is passed explicitly.
pub const USER_ID_ENV: &str = "HCTI_USER_ID";
/// Environment variable consulted for the API key when none is passed explicitly.
pub const API_KEY_ENV: &str = "HCTI_API_KEY";

#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Credentials {
    user_id: String,
    api_key: SecretString,
}

impl Credentials {
    /// Builds credentials from explicit values. Empty values are rejected.
    pub fn new<S: Into<String>>(user_id: S, api_key: SecretString) -> Result<Self> {
        Self::resolve_with(Some(user_id.into()), Some(api_key), |_| None)
    }

    /// Reads both values from [`USER_ID_ENV`] and [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Explicit values win per field, otherwise the process environment is read.
    pub fn resolve(user_id: Option<String>, api_key: Option<SecretString>) -> Result<Self> {
        Self::resolve_with(user_id, api_key, |name| env::var(name).ok())
    }

    /// Same as [`Credentials::resolve`] with a caller-supplied variable lookup.
    ///
    /// Empty strings, explicit or looked up, count as missing.
    pub fn resolve_with<F>(
        user_id: Option<String>,
        api_key: Option<SecretString>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user_id = user_id
            .filter(|value| !value.is_empty())
            .or_else(|| lookup(USER_ID_ENV).filter(|value| !value.is_empty()))
            .ok_or_else(|| Error::missing_credential("user_id", USER_ID_ENV))?;

        let api_key = api_key
            .filter(|value| !value.expose_secret().is_empty())
            .or_else(|| {
                lookup(API_KEY_ENV)
                    .filter(|value| !value.is_empty())
                    .map(SecretString::from)
            })
            .ok_or_else(|| Error::missing_credential("api_key", API_KEY_ENV))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(user_id = %user_id, "resolved credentials");

        Ok(Self { user_id, api_key })
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }
}
