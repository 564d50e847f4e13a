use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::{DEFAULT_HOST, Result};

/// Client configuration: API host plus account credentials.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Config {
    pub host: Url,
    pub credentials: Credentials,
}

impl Config {
    /// Targets the public API host.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self {
            host: Url::parse(DEFAULT_HOST)?,
            credentials,
        })
    }

    /// Resolves credentials from `HCTI_USER_ID` / `HCTI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Points HTTP operations at another host. Signed template URLs are unaffected.
    pub fn with_host(mut self, host: &str) -> Result<Self> {
        let host = Url::parse(host)?;
        if host.cannot_be_a_base() {
            return Err(Error::validation(format!(
                "host `{host}` cannot be used as a base URL"
            )));
        }
        self.host = host;
        Ok(self)
    }
}
