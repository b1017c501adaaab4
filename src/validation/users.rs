use chrono::{DateTime, Utc};
use serde_json::Value;

use super::coerce::looks_like_email;
use super::{strip_server_fields, text, timestamp, ValidationError, PROFILE_MIN_PASSWORD};
use crate::auth::PasswordCodec;
use crate::database::models::User;
use crate::database::Document;

pub const DEFAULT_ROLE: &str = "customer";

/// Profile changes to `$set`, plus the new email so the caller can check it for conflicts.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub set: Document,
    pub email: Option<String>,
}

/// `POST /users` with `"test": true` seeds fixture accounts instead of creating one user.
pub fn is_seed_request(body: &Document) -> bool {
    body.get("test") == Some(&Value::Bool(true))
}

/// Validate an admin-style user creation payload.
pub fn create(body: &Document, now: DateTime<Utc>) -> Result<User, ValidationError> {
    let (Some(name), Some(email), Some(password)) =
        (text(body, "name"), text(body, "email"), text(body, "password"))
    else {
        return Err(ValidationError::MissingUserFields);
    };

    let role = text(body, "role").unwrap_or(DEFAULT_ROLE);

    Ok(User {
        name: Some(name.to_string()),
        email: email.to_lowercase(),
        password: PasswordCodec::encode(password),
        username: None,
        role: Some(role.to_string()),
        created_at: now,
        updated_at: None,
        extra: Document::new(),
    })
}

/// The three fixture accounts inserted by a seed request.
pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    [
        ("Kai Samuel", "samuecfgvhbnl@example.com", "pass123", "customer"),
        ("ftyguh kjhg", "dtfg@example.com", "secret456", "admin"),
        ("dtfchgj nmn", "rduhbgft@example.com", "mypassword", "customer"),
    ]
    .into_iter()
    .map(|(name, email, password, role)| User {
        name: Some(name.to_string()),
        email: email.to_string(),
        password: PasswordCodec::encode(password),
        username: None,
        role: Some(role.to_string()),
        created_at: now,
        updated_at: None,
        extra: Document::new(),
    })
    .collect()
}

/// Validate a profile update. Keys other than name/email/password pass through.
pub fn update(body: &Document, now: DateTime<Utc>) -> Result<UserUpdate, ValidationError> {
    let mut set = strip_server_fields(body.clone());
    let mut new_email = None;

    if let Some(name) = body.get("name") {
        let trimmed = name.as_str().map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        set.insert("name".into(), Value::String(trimmed.to_string()));
    }

    if let Some(email) = body.get("email") {
        let email = email.as_str().unwrap_or_default();
        if !looks_like_email(email) {
            return Err(ValidationError::EmailRequired);
        }
        let normalized = email.to_lowercase();
        set.insert("email".into(), Value::String(normalized.clone()));
        new_email = Some(normalized);
    }

    if let Some(password) = body.get("password") {
        let password = password.as_str().unwrap_or_default();
        if password.chars().count() < PROFILE_MIN_PASSWORD {
            return Err(ValidationError::PasswordTooShort { min: PROFILE_MIN_PASSWORD });
        }
        set.insert("password".into(), Value::String(PasswordCodec::encode(password)));
    }

    set.insert("updatedAt".into(), timestamp(now));

    Ok(UserUpdate { set, email: new_email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn create_requires_name_email_password() {
        let err = create(&body(json!({"name": "A", "email": "a@b.com"})), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingUserFields);
    }

    #[test]
    fn create_defaults_role() {
        let user = create(
            &body(json!({"name": "A", "email": "A@B.com", "password": "pw"})),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(user.role.as_deref(), Some(DEFAULT_ROLE));
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn seed_request_needs_literal_true() {
        assert!(is_seed_request(&body(json!({"test": true}))));
        assert!(!is_seed_request(&body(json!({"test": "true"}))));
        assert_eq!(seed_users(Utc::now()).len(), 3);
    }

    #[test]
    fn update_trims_name_and_lowercases_email() {
        let upd = update(
            &body(json!({"name": "  Ann  ", "email": "Ann@Example.com", "city": "Durban"})),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(upd.set["name"], json!("Ann"));
        assert_eq!(upd.set["email"], json!("ann@example.com"));
        assert_eq!(upd.set["city"], json!("Durban"));
        assert!(upd.set.contains_key("updatedAt"));
        assert_eq!(upd.email.as_deref(), Some("ann@example.com"));
    }

    #[test]
    fn update_rejects_blank_name_bad_email_short_password() {
        assert_eq!(
            update(&body(json!({"name": "   "})), Utc::now()).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            update(&body(json!({"email": "not-an-email"})), Utc::now()).unwrap_err(),
            ValidationError::EmailRequired
        );
        assert_eq!(
            update(&body(json!({"password": "12345"})), Utc::now()).unwrap_err(),
            ValidationError::PasswordTooShort { min: 6 }
        );
    }

    #[test]
    fn update_encodes_password_and_ignores_id() {
        let upd = update(
            &body(json!({"password": "123456", "_id": "507f1f77bcf86cd799439011"})),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(upd.set["password"], json!(PasswordCodec::encode("123456")));
        assert!(!upd.set.contains_key("_id"));
    }
}
