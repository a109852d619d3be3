use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeZone, Utc};
use gatewatch_core::Role;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, error::InvalidJwtPartsSnafu};

/// An opaque bearer token as handed out by the admin login endpoint. Claims
/// are decoded without signature verification; they only gate which rows the
/// dashboard renders, never access itself.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub role: Role,
    pub user_id: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> AccessToken {
        AccessToken(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn claims(&self) -> Result<Claims> {
        let split: Vec<&str> = self.0.split('.').collect();
        if split.len() != 3 {
            return InvalidJwtPartsSnafu.fail();
        }

        let decoded = URL_SAFE_NO_PAD.decode(split[1])?;
        let claims: Claims = serde_json::from_slice(&decoded)?;

        Ok(claims)
    }

    /// Claims usable for role gating, or `None` when the token is malformed
    /// or expired. Failures degrade to "no data", never to a blocking error.
    pub fn active_claims(&self) -> Option<Claims> {
        match self.claims() {
            Ok(claims) if claims.expires_at() > Utc::now() => Some(claims),
            Ok(_) => {
                warn!("bearer token has expired");
                None
            }
            Err(e) => {
                warn!("failed to decode bearer token: {e:?}");
                None
            }
        }
    }
}

impl Claims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Numeric form of the user id claim, when it has one.
    pub fn numeric_user_id(&self) -> Option<i64> {
        self.user_id.parse().ok()
    }
}
