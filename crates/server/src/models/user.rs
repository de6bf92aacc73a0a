use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ValidationError;

pub type UserId = uuid::Uuid;
const USER_EMAIL_LENGTH_LIMIT: usize = 254;
const USER_PASSWORD_MIN_LENGTH: usize = 8;
const USER_PASSWORD_MAX_LENGTH: usize = 80;

#[derive(Clone, Debug)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_user_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::InvalidInput {
            value: email.to_string(),
            reason: "email cannot be empty".to_string(),
        });
    }
    if email.len() > USER_EMAIL_LENGTH_LIMIT {
        return Err(ValidationError::InvalidInput {
            value: email.to_string(),
            reason: format!(
                "email cannot be longer than {} chars",
                USER_EMAIL_LENGTH_LIMIT
            ),
        });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidInput {
            value: email.to_string(),
            reason: "email must look like name@domain".to_string(),
        }),
    }
}

pub fn validate_user_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < USER_PASSWORD_MIN_LENGTH || password.len() > USER_PASSWORD_MAX_LENGTH {
        return Err(ValidationError::InvalidInput {
            value: "<password>".to_string(),
            reason: format!(
                "password should be at least {} and at most {} characters long",
                USER_PASSWORD_MIN_LENGTH, USER_PASSWORD_MAX_LENGTH
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_local_part_and_domain() {
        assert!(validate_user_email("admin@example.com").is_ok());
        assert!(validate_user_email("admin@").is_err());
        assert!(validate_user_email("").is_err());
    }

    #[test]
    fn password_length_is_bounded() {
        assert!(validate_user_password("short").is_err());
        assert!(validate_user_password("long enough").is_ok());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
    }
}
