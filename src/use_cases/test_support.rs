use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tokio::sync::mpsc;

use crate::domain::ports::{
    FederatedCredential, FederatedProvider, IdentityProvider, ProviderError, ProviderSession,
};

// Shared per-method call counter for the fakes below.
#[derive(Clone, Default)]
pub(crate) struct CallLog {
    counts: Arc<Mutex<HashMap<&'static str, usize>>>,
}

impl CallLog {
    fn record(&self, name: &'static str) {
        let mut counts = self.counts.lock().expect("call log mutex poisoned");
        *counts.entry(name).or_insert(0) += 1;
    }

    pub(crate) fn named(&self, name: &str) -> usize {
        let counts = self.counts.lock().expect("call log mutex poisoned");
        counts.get(name).copied().unwrap_or(0)
    }
}

// Recording identity provider with a manual session publisher and a
// failure toggle applied to every mutating entry point.
#[derive(Clone)]
pub(crate) struct FakeIdentityProvider {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<Option<ProviderSession>>>>>,
    failure: Option<ProviderError>,
    popup: bool,
    calls: CallLog,
}

impl FakeIdentityProvider {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            popup: false,
            calls: CallLog::default(),
        }
    }

    pub(crate) fn failing_with(mut self, failure: ProviderError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub(crate) fn with_popup_support(mut self) -> Self {
        self.popup = true;
        self
    }

    pub(crate) fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    // Push a raw session change to every active subscriber.
    pub(crate) fn publish(&self, session: Option<ProviderSession>) {
        let mut subscribers = self.subscribers.lock().expect("subscribers mutex poisoned");
        subscribers.retain(|tx| tx.send(session.clone()).is_ok());
    }

    pub(crate) fn session(uid: &str, email: &str) -> ProviderSession {
        ProviderSession {
            uid: uid.to_string(),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
        }
    }

    fn outcome(&self) -> Result<ProviderSession, ProviderError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(Self::session("fake-uid", "fake@example.com")),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<ProviderSession>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subscribers = self.subscribers.lock().expect("subscribers mutex poisoned");
        subscribers.push(tx);
        rx
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.record("sign_up");
        self.outcome()
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.record("sign_in_with_password");
        self.outcome()
    }

    async fn sign_in_with_popup(&self) -> Result<ProviderSession, ProviderError> {
        self.calls.record("sign_in_with_popup");
        self.outcome()
    }

    async fn sign_in_with_credential(
        &self,
        _credential: FederatedCredential,
    ) -> Result<ProviderSession, ProviderError> {
        self.calls.record("sign_in_with_credential");
        self.outcome()
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.calls.record("sign_out");
        // Deliberately does not publish a signed-out notification; tests
        // control notifications through publish() so ordering is observable.
        self.outcome().map(|_| ())
    }

    fn supports_popup(&self) -> bool {
        self.popup
    }
}

// Recording federated provider with the same failure toggle shape.
#[derive(Clone)]
pub(crate) struct FakeFederatedProvider {
    failure: Option<ProviderError>,
    calls: CallLog,
}

impl FakeFederatedProvider {
    pub(crate) fn new() -> Self {
        Self {
            failure: None,
            calls: CallLog::default(),
        }
    }

    pub(crate) fn failing_with(mut self, failure: ProviderError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub(crate) fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

#[async_trait]
impl FederatedProvider for FakeFederatedProvider {
    async fn sign_in(&self) -> Result<FederatedCredential, ProviderError> {
        self.calls.record("sign_in");
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(FederatedCredential {
                access_token: "fake-access-token".to_string(),
                id_token: "fake-id-token".to_string(),
            }),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.calls.record("sign_out");
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}
