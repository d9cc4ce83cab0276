// Validation Module - client-side form checks that run before any request
use std::fmt;

mod validators;

pub use validators::{
    EmailValidator, FieldValidator, MinLengthValidator, PhoneValidator, RequiredValidator,
};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Message shown for a malformed email address.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Message shown for a password under the minimum length.
pub const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long";
/// Message shown when the confirmation differs from the password.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "Validation error with no specific field errors"),
            [only] => write!(f, "{}", only.message),
            many => {
                write!(f, "Validation failed with {} errors: ", many.len())?;
                for (i, error) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Collects field errors for one form.
///
/// Only the first failure per field is kept, mirroring how a form shows a
/// single message under each input.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        if self.errors.message_for(field).is_none() {
            self.errors.add_field_error(field, message);
        }
    }

    /// Validate a field with a specific validator
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> &mut Self
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        if let Err(msg) = validator.validate(value) {
            self.add_error(field, msg);
        }
        self
    }

    /// Record `message` against `field` when `condition` is false.
    pub fn check(&mut self, field: &str, condition: bool, message: &str) -> &mut Self {
        if !condition {
            self.add_error(field, message);
        }
        self
    }

    /// Finish validation
    pub fn finish(self) -> ValidationResult<()> {
        self.errors.into_result()
    }
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EmailValidator::new().validate(email).is_ok()
}

/// Whether `password` meets the minimum length.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
}

/// Whether the confirmation equals the password exactly.
pub fn validate_password_match(password: &str, confirm: &str) -> bool {
    password == confirm
}

/// Login form: required email with a valid shape, required password of at
/// least eight characters.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    let mut v = Validator::new();
    v.validate_field("email", email, &RequiredValidator::new("Email is required"))
        .validate_field("email", email, &EmailValidator::new())
        .validate_field("password", password, &RequiredValidator::new("Password is required"))
        .validate_field("password", password, &MinLengthValidator::password());
    v.finish()
}

/// Password-change form shared by the admin and patient flows.
pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirm: &str,
) -> ValidationResult<()> {
    let mut v = Validator::new();
    v.validate_field(
        "currentPassword",
        current,
        &RequiredValidator::new("Current password is required"),
    )
    .validate_field("newPassword", new_password, &RequiredValidator::new("Password is required"))
    .validate_field("newPassword", new_password, &MinLengthValidator::password())
    .validate_field(
        "confirmPassword",
        confirm,
        &RequiredValidator::new("Please confirm your password"),
    )
    .check(
        "confirmPassword",
        validate_password_match(new_password, confirm),
        PASSWORD_MISMATCH_MESSAGE,
    );
    v.finish()
}
