use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::entities::{AppState, AuthEvent};
use crate::domain::ports::{FederatedProvider, IdentityProvider, UserCache};
use crate::use_cases::session_source::SessionSource;

// Auth state machine. Consumes the session source's user stream plus
// explicit logout requests through a single ordered inbox and publishes the
// application-wide AppState for the router to observe. The machine itself
// never fails; the only provider operation it drives is log_out.
pub struct AuthFlow {
    events: mpsc::UnboundedSender<AuthEvent>,
    state: watch::Receiver<AppState>,
    forwarder: JoinHandle<()>,
    worker: JoinHandle<()>,
}

impl AuthFlow {
    // Subscribes to the user stream immediately. No state is synthesized
    // from current_user(); the first transition away from Unknown happens on
    // the first stream value.
    pub fn new<P, F, C>(source: Arc<SessionSource<P, F, C>>) -> Self
    where
        P: IdentityProvider + 'static,
        F: FederatedProvider + 'static,
        C: UserCache + 'static,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(AppState::unknown());

        let mut users = source.user_stream();
        let forward_tx = event_tx.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(user) = users.recv().await {
                if forward_tx.send(AuthEvent::UserChanged(user)).is_err() {
                    break;
                }
            }
        });

        let worker = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                match event {
                    AuthEvent::UserChanged(user) => {
                        if state_tx.send(AppState::from_user(user)).is_err() {
                            break;
                        }
                    }
                    AuthEvent::LogoutRequested => {
                        // State moves only on the signed-out notification the
                        // provider emits afterwards; a failed logout is
                        // logged and otherwise invisible here.
                        if let Err(err) = source.log_out().await {
                            warn!(error = %err, "logout failed");
                        }
                    }
                }
            }
        });

        Self {
            events: event_tx,
            state: state_rx,
            forwarder,
            worker,
        }
    }

    // Observer handle for the router; starts at the current state.
    pub fn state(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    pub fn current_state(&self) -> AppState {
        self.state.borrow().clone()
    }

    // Enqueue a logout request. Fire-and-forget from the state-transition
    // perspective; callers needing the failure invoke the session source
    // directly.
    pub fn log_out(&self) {
        let _ = self.events.send(AuthEvent::LogoutRequested);
    }
}

impl Drop for AuthFlow {
    fn drop(&mut self) {
        self.forwarder.abort();
        self.worker.abort();
    }
}
