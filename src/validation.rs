//! Signup form validation
//!
//! Pure checks over the five signup fields. The first failing check wins and
//! its message is what the UI shows in the blocking notice.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw values of the signup form, read at submit time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// The first check a signup form failed
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Please enter your password")]
    MissingPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub const PHONE_DIGITS: usize = 10;

/// Run the signup checks in order, stopping at the first failure.
pub fn validate_signup(form: &SignupForm) -> Result<(), SignupError> {
    if form.name.trim().is_empty() {
        return Err(SignupError::MissingName);
    }
    if form.email.trim().is_empty() {
        return Err(SignupError::MissingEmail);
    }
    if !is_valid_phone(&form.phone) {
        return Err(SignupError::InvalidPhone);
    }
    if form.password.trim().is_empty() {
        return Err(SignupError::MissingPassword);
    }
    if form.password != form.confirm_password {
        return Err(SignupError::PasswordMismatch);
    }
    Ok(())
}

/// Exactly ten ASCII digits, nothing around them.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Jane".into(),
            email: "j@x.com".into(),
            phone: "1234567890".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate_signup(&valid_form()), Ok(()));
    }

    #[test]
    fn test_blank_fields_fail_first() {
        let form = SignupForm {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::MissingName));

        let form = SignupForm {
            email: "\t".into(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::MissingEmail));

        let form = SignupForm {
            password: "  ".into(),
            confirm_password: "  ".into(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::MissingPassword));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("98765abcde"));
        assert!(!is_valid_phone(" 9876543210"));
        assert!(!is_valid_phone("98765432１0"));

        let form = SignupForm {
            phone: "98765abcde".into(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::InvalidPhone));
    }

    #[test]
    fn test_password_mismatch_is_exact() {
        let form = SignupForm {
            confirm_password: "Secret1".into(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::PasswordMismatch));

        let form = SignupForm {
            confirm_password: "secret1 ".into(),
            ..valid_form()
        };
        assert_eq!(validate_signup(&form), Err(SignupError::PasswordMismatch));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SignupError::InvalidPhone.to_string(),
            "Please enter a valid 10-digit phone number"
        );
        assert_eq!(
            SignupError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
