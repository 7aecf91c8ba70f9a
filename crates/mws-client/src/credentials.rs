//! Seller credentials.
//!
//! The secret key and the delegation token are redacted in `Debug` output so
//! credentials can be logged without leaking them.

use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};

/// Credentials identifying the seller and signing its requests.
#[derive(Clone, Deserialize)]
pub struct MwsCredentials {
    #[serde(alias = "Seller_Id", default)]
    seller_id: String,
    #[serde(alias = "Marketplace_Id", default)]
    marketplace_id: String,
    #[serde(alias = "Access_Key_ID", default)]
    access_key_id: String,
    #[serde(alias = "Secret_Access_Key", default)]
    secret_access_key: String,
    #[serde(alias = "MWSAuthToken", default)]
    auth_token: Option<String>,
}

impl std::fmt::Debug for MwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MwsCredentials")
            .field("seller_id", &self.seller_id)
            .field("marketplace_id", &self.marketplace_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl MwsCredentials {
    /// Create credentials from the four required values.
    pub fn new(
        seller_id: impl Into<String>,
        marketplace_id: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            seller_id: seller_id.into(),
            marketplace_id: marketplace_id.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            auth_token: None,
        }
    }

    /// Attach a delegation token (`MWSAuthToken`).
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Load credentials from the environment.
    ///
    /// Reads `MWS_SELLER_ID`, `MWS_MARKETPLACE_ID`, `MWS_ACCESS_KEY_ID`,
    /// `MWS_SECRET_ACCESS_KEY` and, optionally, `MWS_AUTH_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| {
                Error::new(ErrorKind::Config(format!("{name} environment variable not set")))
            })
        };

        let credentials = Self {
            seller_id: var("MWS_SELLER_ID")?,
            marketplace_id: var("MWS_MARKETPLACE_ID")?,
            access_key_id: var("MWS_ACCESS_KEY_ID")?,
            secret_access_key: var("MWS_SECRET_ACCESS_KEY")?,
            auth_token: std::env::var("MWS_AUTH_TOKEN").ok(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("Seller_Id", &self.seller_id),
            ("Marketplace_Id", &self.marketplace_id),
            ("Access_Key_ID", &self.access_key_id),
            ("Secret_Access_Key", &self.secret_access_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::new(ErrorKind::Config(format!(
                    "Required field {name} is not set"
                ))));
            }
        }
        Ok(())
    }

    pub fn seller_id(&self) -> &str {
        &self.seller_id
    }

    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// The delegation token, if one is set and non-empty.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|t| !t.is_empty())
    }
}
