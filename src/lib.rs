//! Authentication core for a mobile login flow: a session source wrapping an
//! external identity provider (email/password and federated Google sign-in),
//! an event-driven auth state machine that drives routing, the failure
//! taxonomy translating provider error codes into user-facing messages, and
//! form-field validators.

pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::entities::{AppState, AuthEvent, AuthStatus, User};
pub use domain::errors::{GoogleLoginFailure, LoginFailure, LogoutFailure, SignUpFailure};
pub use domain::ports::{
    FederatedCredential, FederatedProvider, IdentityProvider, ProviderError, ProviderSession,
    UserCache,
};
pub use use_cases::auth_flow::AuthFlow;
pub use use_cases::session_source::SessionSource;
