use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, error::FailedRequestSnafu},
    token::AccessToken,
};

/// Client for the admin login endpoint.
pub struct AuthClient {
    login_address: Url,
    client: Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl AuthClient {
    pub fn new(login_address: Url) -> AuthClient {
        AuthClient {
            login_address,
            client: Client::new(),
        }
    }

    /// Exchanges credentials for the opaque bearer token. Login failures
    /// surface the server's error body.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken> {
        let response = self
            .client
            .post(self.login_address.clone())
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: self.login_address.to_string(),
                status,
                body: response.text().await?,
            }
            .fail();
        }

        let response: LoginResponse = response.json().await?;

        Ok(AccessToken::new(response.token))
    }
}
