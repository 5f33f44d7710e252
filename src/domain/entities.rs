use crate::domain::ports::ProviderSession;

// Identity snapshot of the signed-in user. A new value replaces the old one
// on every provider notification; nothing mutates a User in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
}

impl User {
    // Sentinel for "no authenticated user". An empty id never comes from the
    // provider, so emptiness doubles as the signed-out marker.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            email: None,
            name: None,
            photo: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn from_session(session: ProviderSession) -> Self {
        Self {
            id: session.uid,
            email: session.email,
            name: session.display_name,
            photo: session.photo_url,
        }
    }
}

// Application-wide authentication status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Unknown,
    Authenticated,
    Unauthenticated,
}

// Authentication status paired with the current user. Fields are private so
// the constructors below are the only way to build one, which keeps
// `Authenticated` tied to a non-empty user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState {
    status: AuthStatus,
    user: User,
}

impl AppState {
    // Initial state before the first session notification arrives.
    pub fn unknown() -> Self {
        Self {
            status: AuthStatus::Unknown,
            user: User::empty(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: AuthStatus::Unauthenticated,
            user: User::empty(),
        }
    }

    // Classify a user snapshot: an empty user means signed out.
    pub fn from_user(user: User) -> Self {
        if user.is_empty() {
            Self::unauthenticated()
        } else {
            Self {
                status: AuthStatus::Authenticated,
                user,
            }
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

// Inputs to the auth state machine, processed strictly in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    UserChanged(User),
    LogoutRequested,
}
