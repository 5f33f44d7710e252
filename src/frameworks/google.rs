use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{FederatedCredential, FederatedProvider, ProviderError};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

// Google OAuth handshake producing the token pair the identity provider
// redeems for a session. Sign-in uses the refresh-token grant with the
// credentials from config; sign-out revokes the refresh token's grant.
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    id_token: Option<String>,
}

impl GoogleOAuthClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        })
    }
}

#[async_trait]
impl FederatedProvider for GoogleOAuthClient {
    async fn sign_in(&self) -> Result<FederatedCredential, ProviderError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|err| ProviderError::uncoded(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::uncoded(format!(
                "google token endpoint returned {status}"
            )));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|err| ProviderError::uncoded(err.to_string()))?;

        let id_token = token.id_token.ok_or_else(|| {
            ProviderError::uncoded("google token response carried no id_token")
        })?;

        debug!("google handshake produced a token pair");
        Ok(FederatedCredential {
            access_token: token.access_token,
            id_token,
        })
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(REVOKE_URL)
            .form(&[("token", self.refresh_token.as_str())])
            .send()
            .await
            .map_err(|err| ProviderError::uncoded(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::uncoded(format!(
                "google revocation returned {status}"
            )));
        }

        Ok(())
    }
}
