use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// Form-field validation for the login and sign-up screens. Parsing returns
// a validated newtype so handlers downstream never see raw input.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EmailValidationError {
    #[error("Please ensure the email entered is valid")]
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Password must contain at least one letter")]
    MissingLetter,
    #[error("Password must contain at least one digit")]
    MissingDigit,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern is valid")
    })
}

// Validated email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> Result<Self, EmailValidationError> {
        if email_pattern().is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(EmailValidationError::Invalid)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Validated password: at least 8 characters with one letter and one digit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn parse(value: &str) -> Result<Self, PasswordValidationError> {
        if value.chars().count() < 8 {
            return Err(PasswordValidationError::TooShort);
        }
        if !value.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordValidationError::MissingLetter);
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordValidationError::MissingDigit);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
