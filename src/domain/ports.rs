use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::entities::User;

// Raw session snapshot reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSession {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

// Error surfaced by provider entry points. `code` carries the provider's
// string error code when one was supplied; failure mapping keys off it.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn uncoded(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

// Token pair produced by a federated sign-in handshake, redeemable at the
// identity provider for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FederatedCredential {
    pub access_token: String,
    pub id_token: String,
}

// Port for the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    // Session-change notifications. `None` means signed out. The receiver
    // observes every change published after subscription, duplicates
    // included; the subscription lives until the receiver is dropped.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<ProviderSession>>;

    async fn sign_up(&self, email: &str, password: &str)
        -> Result<ProviderSession, ProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, ProviderError>;

    // Browser-popup federated flow handled entirely by the provider.
    async fn sign_in_with_popup(&self) -> Result<ProviderSession, ProviderError>;

    // Exchange externally obtained federated tokens for a session.
    async fn sign_in_with_credential(
        &self,
        credential: FederatedCredential,
    ) -> Result<ProviderSession, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    // Whether the popup flow is available on this platform.
    fn supports_popup(&self) -> bool;
}

// Port for the federated (Google) sign-in provider.
#[async_trait]
pub trait FederatedProvider: Send + Sync {
    async fn sign_in(&self) -> Result<FederatedCredential, ProviderError>;
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

// Port for the in-process cache of the last observed user.
pub trait UserCache: Send + Sync {
    fn write(&self, user: &User);
    fn read(&self) -> Option<User>;
}
