// Field Validators - Reusable validation components
use once_cell::sync::Lazy;
use regex::Regex;

use super::{PASSWORD_MESSAGE, PASSWORD_MIN_LENGTH};

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[allow(clippy::expect_used)]
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-\(\)]+$").expect("phone pattern compiles"));

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Rejects empty or whitespace-only input.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Create a required-field validator with its message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl FieldValidator<str> for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err(self.message.clone());
        }
        Ok(())
    }
}

/// Email shape check (`local@domain.tld`, no whitespace)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        // Empty input is left to RequiredValidator.
        if value.is_empty() || EMAIL_REGEX.is_match(value) {
            return Ok(());
        }
        Err(super::EMAIL_MESSAGE.to_string())
    }
}

/// Minimum length in characters
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min: usize,
    message: String,
}

impl MinLengthValidator {
    /// Create a validator requiring at least `min` characters
    pub fn new(min: usize, message: impl Into<String>) -> Self {
        Self { min, message: message.into() }
    }

    /// The password rule
    pub fn password() -> Self {
        Self::new(PASSWORD_MIN_LENGTH, PASSWORD_MESSAGE)
    }
}

impl FieldValidator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.is_empty() || value.chars().count() >= self.min {
            return Ok(());
        }
        Err(self.message.clone())
    }
}

/// Optional phone number: digits, spaces, dashes, parentheses, leading `+`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneValidator;

impl FieldValidator<str> for PhoneValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.is_empty() || PHONE_REGEX.is_match(value) {
            return Ok(());
        }
        Err("Please enter a valid phone number".to_string())
    }
}
