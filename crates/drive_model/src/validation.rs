//! Client-side validation rules for the auth forms.

use std::fmt;

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validation failure for one form field.
pub struct FieldError {
    /// Field key (`name`, `email`, `password`, `confirmPassword`).
    pub field: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Collected field failures for one form submission.
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// Records the outcome of a field validator.
    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(err) = result {
            self.0.push(err);
        }
    }

    /// Returns the first message recorded for `field`.
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }

    /// Returns `true` when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `Ok(())` when empty, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn fail(field: &'static str, message: &'static str) -> Result<(), FieldError> {
    Err(FieldError { field, message })
}

/// Registration display name: required, at least two characters.
pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let name = name.trim();
    if name.is_empty() {
        return fail("name", "Full name is required");
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return fail("name", "Name must be at least 2 characters");
    }
    Ok(())
}

/// Email address: required, `local@domain.tld` with a letters-only TLD of two or more characters.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return fail("email", "Email is required");
    }
    if is_plausible_email(email) {
        Ok(())
    } else {
        fail("email", "Invalid email address")
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '%' | '+' | '-'));
    if !local_ok {
        return false;
    }
    if !domain
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-'))
    {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic())
}

/// Login password: only presence is checked.
pub fn validate_login_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return fail("password", "Password is required");
    }
    Ok(())
}

/// New password for registration and reset: required, at least eight characters.
pub fn validate_new_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return fail("password", "Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return fail("password", "Password must be at least 8 characters");
    }
    Ok(())
}

/// Password confirmation: required and equal to `password`.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldError> {
    if confirm.is_empty() {
        return fail("confirmPassword", "Please confirm your password");
    }
    if confirm != password {
        return fail("confirmPassword", "Passwords do not match");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules_match_form_pattern() {
        for ok in ["a@b.co", "First.Last+tag@mail.example.ORG", "x_y%z@sub-d.io"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
        for bad in ["plain", "@b.co", "a@b", "a@b.c", "a@.co", "a b@c.io", "a@b.c0m", "a@@b.co"] {
            assert_eq!(
                validate_email(bad).unwrap_err().message,
                "Invalid email address",
                "{bad}"
            );
        }
        assert_eq!(validate_email("  ").unwrap_err().message, "Email is required");
    }

    #[test]
    fn password_rules() {
        assert_eq!(
            validate_login_password("").unwrap_err().message,
            "Password is required"
        );
        assert!(validate_login_password("x").is_ok());
        assert_eq!(
            validate_new_password("short").unwrap_err().message,
            "Password must be at least 8 characters"
        );
        assert!(validate_new_password("longenough").is_ok());
        assert_eq!(
            validate_confirm_password("longenough", "different").unwrap_err().message,
            "Passwords do not match"
        );
        assert_eq!(
            validate_confirm_password("longenough", "").unwrap_err().field,
            "confirmPassword"
        );
    }

    #[test]
    fn form_errors_collects_first_message_per_field() {
        let mut errors = FormErrors::default();
        errors.check(validate_name("A"));
        errors.check(validate_email("ada@example.com"));
        errors.check(validate_new_password(""));
        assert_eq!(
            errors.message_for("name"),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(errors.message_for("email"), None);
        assert_eq!(errors.message_for("password"), Some("Password is required"));
        assert!(errors.into_result().is_err());
    }
}
