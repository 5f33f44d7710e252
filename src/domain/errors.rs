use thiserror::Error;

use crate::domain::ports::ProviderError;

// User-facing failures, one per operation family. Each resolves the
// provider's string error code to a fixed message at the session-source
// boundary; no raw provider error escapes past it. `from_code` is total:
// an unrecognized code falls back to the family's generic message.

const GENERIC_MESSAGE: &str = "An unknown error occurred, please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SignUpFailure {
    pub message: &'static str,
}

impl SignUpFailure {
    pub fn from_code(code: &str) -> Self {
        let message = match code {
            "invalid-email" => "Email is not valid or badly formatted.",
            "user-disabled" => "This user has been disabled. Please contact support for help.",
            "email-already-in-use" => "An account already exists for that email.",
            "operation-not-allowed" => "Operation is not allowed. Please contact support.",
            "weak-password" => "The password is not strong enough",
            _ => GENERIC_MESSAGE,
        };
        Self { message }
    }

    pub fn generic() -> Self {
        Self {
            message: GENERIC_MESSAGE,
        }
    }
}

impl From<ProviderError> for SignUpFailure {
    fn from(err: ProviderError) -> Self {
        match err.code.as_deref() {
            Some(code) => Self::from_code(code),
            None => Self::generic(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: &'static str,
}

impl LoginFailure {
    pub fn from_code(code: &str) -> Self {
        let message = match code {
            "invalid-email" => "Email is not valid or badly formatted.",
            "user-disabled" => "This user has been disabled. Please contact support for help.",
            "user-not-found" => "Email is not found, please create an account.",
            "wrong-password" => "Incorrect password, please try again.",
            _ => GENERIC_MESSAGE,
        };
        Self { message }
    }

    pub fn generic() -> Self {
        Self {
            message: GENERIC_MESSAGE,
        }
    }
}

impl From<ProviderError> for LoginFailure {
    fn from(err: ProviderError) -> Self {
        match err.code.as_deref() {
            Some(code) => Self::from_code(code),
            None => Self::generic(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GoogleLoginFailure {
    pub message: &'static str,
}

impl GoogleLoginFailure {
    pub fn from_code(code: &str) -> Self {
        let message = match code {
            "account-exists-with-different-credential" => {
                "Account exists with different credentials."
            }
            "invalid-credential" => "The credential received is malformed or has expired.",
            "operation-not-allowed" => "Operation is not allowed. Please contact support.",
            "invalid-verification-code" => "The credential verification code received is invalid.",
            "invalid-verification-id" => "The credential verification ID received is invalid.",
            _ => GENERIC_MESSAGE,
        };
        Self { message }
    }

    pub fn generic() -> Self {
        Self {
            message: GENERIC_MESSAGE,
        }
    }
}

impl From<ProviderError> for GoogleLoginFailure {
    fn from(err: ProviderError) -> Self {
        match err.code.as_deref() {
            Some(code) => Self::from_code(code),
            None => Self::generic(),
        }
    }
}

// Logout never resolves a code; every failure collapses to one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LogoutFailure {
    pub message: &'static str,
}

impl LogoutFailure {
    pub fn generic() -> Self {
        Self {
            message: "Failed to sign out, please try again.",
        }
    }
}

impl From<ProviderError> for LogoutFailure {
    fn from(_: ProviderError) -> Self {
        Self::generic()
    }
}
