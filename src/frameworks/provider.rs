use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ports::{
    FederatedCredential, IdentityProvider, ProviderError, ProviderSession,
};

// Thin reqwest adapter for an identity-toolkit style REST API. Successful
// sign-ins publish the new session to every subscriber; sign-out publishes
// the absence. REST error identifiers are normalized to the dashed provider
// codes the failure taxonomy keys off.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Option<ProviderSession>>>>,
}

#[derive(Debug, Serialize)]
struct PasswordAuthRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
struct IdpAuthRequest {
    #[serde(rename = "postBody")]
    post_body: String,
    #[serde(rename = "requestUri")]
    request_uri: &'static str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    #[serde(rename = "localId")]
    local_id: String,
    email: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    #[serde(rename = "photoUrl")]
    photo_url: Option<String>,
}

impl SessionPayload {
    fn into_session(self) -> ProviderSession {
        ProviderSession {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name,
            photo_url: self.photo_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RestErrorEnvelope {
    error: RestErrorBody,
}

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: String,
}

impl HttpIdentityProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    fn publish(&self, session: Option<ProviderSession>) {
        let mut subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        subscribers.retain(|tx| tx.send(session.clone()).is_ok());
    }

    async fn exchange<B: Serialize>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<ProviderSession, ProviderError> {
        let url = format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url, action, self.api_key
        );

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| ProviderError::uncoded(err.to_string()))?;

        if response.status().is_success() {
            let payload = response
                .json::<SessionPayload>()
                .await
                .map_err(|err| ProviderError::uncoded(err.to_string()))?;
            let session = payload.into_session();
            debug!(uid = %session.uid, action, "identity provider session established");
            self.publish(Some(session.clone()));
            return Ok(session);
        }

        let status = response.status();
        let envelope = response
            .json::<RestErrorEnvelope>()
            .await
            .map_err(|_| ProviderError::uncoded(format!("provider returned {status}")))?;
        Err(rest_error(&envelope.error.message))
    }
}

// The REST API reports identifiers like "WEAK_PASSWORD : Password should be
// at least 6 characters"; only the leading identifier is meaningful.
fn rest_error(message: &str) -> ProviderError {
    let identifier = message
        .split(|c: char| c == ':' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    match normalize_error_code(identifier) {
        Some(code) => ProviderError::with_code(code, message),
        None => ProviderError::uncoded(message),
    }
}

// REST error identifier to the provider's dashed code vocabulary. Unknown
// identifiers yield None, which downstream failure mapping resolves to a
// generic message.
fn normalize_error_code(identifier: &str) -> Option<&'static str> {
    let code = match identifier {
        "INVALID_EMAIL" => "invalid-email",
        "USER_DISABLED" => "user-disabled",
        "EMAIL_EXISTS" => "email-already-in-use",
        "OPERATION_NOT_ALLOWED" => "operation-not-allowed",
        "WEAK_PASSWORD" => "weak-password",
        "EMAIL_NOT_FOUND" => "user-not-found",
        "INVALID_PASSWORD" => "wrong-password",
        "INVALID_IDP_RESPONSE" => "invalid-credential",
        "FEDERATED_USER_ID_ALREADY_LINKED" => "account-exists-with-different-credential",
        "INVALID_CODE" => "invalid-verification-code",
        "INVALID_SESSION_INFO" => "invalid-verification-id",
        _ => return None,
    };
    Some(code)
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<ProviderSession>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        subscribers.push(tx);
        rx
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.exchange(
            "signUp",
            &PasswordAuthRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.exchange(
            "signInWithPassword",
            &PasswordAuthRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_in_with_popup(&self) -> Result<ProviderSession, ProviderError> {
        // No browser runtime here; callers take the credential-exchange path.
        Err(ProviderError::with_code(
            "operation-not-allowed",
            "popup sign-in is not available on this platform",
        ))
    }

    async fn sign_in_with_credential(
        &self,
        credential: FederatedCredential,
    ) -> Result<ProviderSession, ProviderError> {
        let post_body = format!(
            "id_token={}&access_token={}&providerId=google.com",
            credential.id_token, credential.access_token
        );
        self.exchange(
            "signInWithIdp",
            &IdpAuthRequest {
                post_body,
                request_uri: "http://localhost",
                return_secure_token: true,
            },
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        // Sessions are provider-side state; locally sign-out only drops the
        // session and notifies subscribers.
        self.publish(None);
        Ok(())
    }

    fn supports_popup(&self) -> bool {
        false
    }
}
