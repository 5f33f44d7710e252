use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::entities::User;
use crate::domain::errors::{GoogleLoginFailure, LoginFailure, LogoutFailure, SignUpFailure};
use crate::domain::ports::{FederatedProvider, IdentityProvider, UserCache};

// Normalizes the external identity provider into the application vocabulary:
// a user stream, a synchronously readable cached user, and the mutating
// sign-up/sign-in/sign-out operations with typed failures.
pub struct SessionSource<P, F, C> {
    provider: Arc<P>,
    federated: Arc<F>,
    cache: Arc<C>,
}

impl<P, F, C> SessionSource<P, F, C>
where
    P: IdentityProvider + 'static,
    F: FederatedProvider + 'static,
    C: UserCache + 'static,
{
    pub fn new(provider: Arc<P>, federated: Arc<F>, cache: Arc<C>) -> Self {
        Self {
            provider,
            federated,
            cache,
        }
    }

    // Infinite stream of user snapshots, one value per provider session
    // change, `User::empty()` when signed out. One long-lived subscriber is
    // expected (the auth state machine); the stream is not restartable.
    pub fn user_stream(&self) -> mpsc::UnboundedReceiver<User> {
        let mut sessions = self.provider.subscribe();
        let cache = Arc::clone(&self.cache);
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(session) = sessions.recv().await {
                let user = session.map(User::from_session).unwrap_or_else(User::empty);
                // Cache before forwarding so current_user() never reflects a
                // state older than a notification already delivered.
                cache.write(&user);
                if tx.send(user).is_err() {
                    break;
                }
            }
        });

        rx
    }

    // Last user observed on the stream, `User::empty()` before the first
    // notification.
    pub fn current_user(&self) -> User {
        self.cache.read().unwrap_or_else(User::empty)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), SignUpFailure> {
        self.provider
            .sign_up(email, password)
            .await
            .map(|_| ())
            .map_err(SignUpFailure::from)
    }

    pub async fn log_in_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(), LoginFailure> {
        self.provider
            .sign_in_with_password(email, password)
            .await
            .map(|_| ())
            .map_err(LoginFailure::from)
    }

    // Popup flow where the provider supports it, otherwise a federated
    // handshake whose tokens are exchanged for a provider session. Both
    // paths converge on a provider credential; every failure maps to
    // GoogleLoginFailure.
    pub async fn log_in_with_google(&self) -> Result<(), GoogleLoginFailure> {
        if self.provider.supports_popup() {
            self.provider
                .sign_in_with_popup()
                .await
                .map(|_| ())
                .map_err(GoogleLoginFailure::from)
        } else {
            let credential = self
                .federated
                .sign_in()
                .await
                .map_err(GoogleLoginFailure::from)?;
            self.provider
                .sign_in_with_credential(credential)
                .await
                .map(|_| ())
                .map_err(GoogleLoginFailure::from)
        }
    }

    // Signs out of the identity provider and the federated provider
    // concurrently. Either failing fails the whole operation; the two
    // sign-outs are not individually observable to the caller.
    pub async fn log_out(&self) -> Result<(), LogoutFailure> {
        let (provider, federated) =
            tokio::join!(self.provider.sign_out(), self.federated.sign_out());

        provider.map_err(LogoutFailure::from)?;
        federated.map_err(LogoutFailure::from)?;
        Ok(())
    }
}
