/// Validation utilities for user input

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    if !email.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    ValidationResult::ok()
}

/// Validate username
pub fn validate_username(username: &str) -> ValidationResult {
    if username.is_empty() {
        return ValidationResult::err("Username is required");
    }

    if username.len() < 3 {
        return ValidationResult::err("Username must be at least 3 characters");
    }

    ValidationResult::ok()
}

/// Validate password strength
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.len() < 6 {
        return ValidationResult::err("Password must be at least 6 characters");
    }

    ValidationResult::ok()
}

/// Validate a discussion message before sending
pub fn validate_message(content: &str) -> ValidationResult {
    if content.trim().is_empty() {
        return ValidationResult::err("Message cannot be empty");
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(validate_email("user@domain.co.uk").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
    }

    #[test]
    fn test_username_validation() {
        assert!(validate_username("alice").is_valid);
        assert!(validate_username("abc").is_valid);
        assert!(!validate_username("ab").is_valid); // too short
        assert!(!validate_username("").is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("secret1").is_valid);
        assert!(!validate_password("short").is_valid);
        assert!(!validate_password("").is_valid);
    }

    #[test]
    fn test_message_validation() {
        assert!(validate_message("hello").is_valid);
        assert!(!validate_message("").is_valid);
        assert!(!validate_message("   ").is_valid);
        assert!(!validate_message("\t\n").is_valid);
    }
}
