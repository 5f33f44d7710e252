use std::env;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::frameworks::config::AppConfig;
use crate::frameworks::google::GoogleOAuthClient;
use crate::frameworks::provider::HttpIdentityProvider;
use crate::interface_adapters::cache::InMemoryUserCache;
use crate::use_cases::auth_flow::AuthFlow;
use crate::use_cases::session_source::SessionSource;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Demo wiring: real adapters from env config, every state transition logged,
// optional email/password login attempt, runs until ctrl-c.
pub async fn run() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return;
        }
    };

    let provider = match HttpIdentityProvider::new(
        config.identity_base_url.clone(),
        config.identity_api_key.clone(),
        config.http_timeout,
    ) {
        Ok(provider) => provider,
        Err(err) => {
            error!(error = %err, "failed to build identity provider client");
            return;
        }
    };

    let federated = match GoogleOAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_refresh_token.clone(),
        config.http_timeout,
    ) {
        Ok(federated) => federated,
        Err(err) => {
            error!(error = %err, "failed to build google oauth client");
            return;
        }
    };

    let source = Arc::new(SessionSource::new(
        Arc::new(provider),
        Arc::new(federated),
        Arc::new(InMemoryUserCache::new()),
    ));
    let flow = AuthFlow::new(Arc::clone(&source));

    let mut state = flow.state();
    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let current = state.borrow().clone();
            info!(status = ?current.status(), user = %current.user().id, "auth state changed");
        }
    });

    if let (Ok(email), Ok(password)) =
        (env::var("AUTH_DEMO_EMAIL"), env::var("AUTH_DEMO_PASSWORD"))
    {
        match source.log_in_with_email_and_password(&email, &password).await {
            Ok(()) => info!("demo login succeeded"),
            Err(err) => warn!(error = %err, "demo login failed"),
        }
    }

    info!("auth core running, ctrl-c to exit");
    let _ = tokio::signal::ctrl_c().await;
}
