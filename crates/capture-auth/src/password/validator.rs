//! Password policy enforcement for new passwords.

use capture_core::config::AuthConfig;
use capture_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        // Entropy check on top of the structural rules
        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture_core::config::AuthConfig;

    fn validator() -> PasswordValidator {
        let config: AuthConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        PasswordValidator::new(&config)
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(validator().validate("a1").is_err());
    }

    #[test]
    fn rejects_passwords_without_digits() {
        assert!(validator().validate("no-digits-here!").is_err());
    }

    #[test]
    fn accepts_a_strong_password() {
        assert!(validator().validate("tr4il-runner-kites-dawn").is_ok());
    }
}
