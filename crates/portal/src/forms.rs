//! Login and registration form data and validation.
//!
//! Validation reports at most one message per field: the first rule the
//! field violates. Lengths are counted in characters.

use secrecy::SecretString;
use serde::Deserialize;

use fleetmaster_core::Email;

use crate::services::auth::NewUser;

/// Minimum password length (login and registration).
pub const MIN_PASSWORD_LEN: usize = 6;
/// Minimum business name length.
pub const MIN_BUSINESS_NAME_LEN: usize = 2;
/// Minimum phone number length.
pub const MIN_PHONE_LEN: usize = 10;

/// Field-level and form-level messages shown to the user.
pub mod messages {
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
    pub const BUSINESS_NAME_TOO_SHORT: &str = "Business name must be at least 2 characters";
    pub const INVALID_PHONE: &str = "Please enter a valid phone number";
    pub const CONFIRM_PASSWORD_TOO_SHORT: &str = "Confirm password must be at least 6 characters";
    pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

    pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
    pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting to dashboard...";
    pub const REGISTER_SUCCESS: &str = "Registration successful! Redirecting to dashboard...";
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_password(password: &str) -> Option<&'static str> {
    (char_len(password) < MIN_PASSWORD_LEN).then_some(messages::PASSWORD_TOO_SHORT)
}

// =============================================================================
// Login
// =============================================================================

/// Login form data.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Per-field login validation messages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

/// Validated login input.
pub struct LoginInput {
    pub email: Email,
    pub password: SecretString,
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field is invalid.
    pub fn validate(&self) -> Result<LoginInput, LoginErrors> {
        let email = Email::parse(&self.email);
        let errors = LoginErrors {
            email: email.is_err().then_some(messages::INVALID_EMAIL),
            password: check_password(&self.password),
        };

        match email {
            Ok(email) if errors == LoginErrors::default() => Ok(LoginInput {
                email,
                password: SecretString::from(self.password.clone()),
            }),
            _ => Err(errors),
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Registration form data. Field names match the form's input names.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Per-field registration validation messages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegisterErrors {
    pub email: Option<&'static str>,
    pub business_name: Option<&'static str>,
    pub phone_number: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirm_password: Option<&'static str>,
}

impl RegisterForm {
    /// Validate the form.
    ///
    /// The phone number is checked but not kept: records carry no phone.
    /// The confirmation is compared with the password only once it meets
    /// the length rule itself.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field is invalid.
    pub fn validate(&self) -> Result<NewUser, RegisterErrors> {
        let email = Email::parse(&self.email);

        let confirm_password = if char_len(&self.confirm_password) < MIN_PASSWORD_LEN {
            Some(messages::CONFIRM_PASSWORD_TOO_SHORT)
        } else if self.confirm_password != self.password {
            Some(messages::PASSWORDS_DO_NOT_MATCH)
        } else {
            None
        };

        let errors = RegisterErrors {
            email: email.is_err().then_some(messages::INVALID_EMAIL),
            business_name: (char_len(&self.business_name) < MIN_BUSINESS_NAME_LEN)
                .then_some(messages::BUSINESS_NAME_TOO_SHORT),
            phone_number: (char_len(&self.phone_number) < MIN_PHONE_LEN)
                .then_some(messages::INVALID_PHONE),
            password: check_password(&self.password),
            confirm_password,
        };

        match email {
            Ok(email) if errors == RegisterErrors::default() => Ok(NewUser {
                email,
                business_name: self.business_name.clone(),
                password: SecretString::from(self.password.clone()),
            }),
            _ => Err(errors),
        }
    }
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("business_name", &self.business_name)
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}
