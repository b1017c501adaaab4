use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{strip_server_fields, text, ValidationError, SIGN_UP_MIN_PASSWORD};
use crate::auth::PasswordCodec;
use crate::database::models::User;
use crate::database::Document;

/// Normalized sign-in request. `email` is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate a sign-up payload and build the user to insert.
///
/// Rule order: a password string under the minimum (empty included) is reported first, then missing
/// credentials, then a malformed email, then a confirmation mismatch. Fields
/// other than the credentials are kept on the user verbatim.
pub fn sign_up(body: &Document, now: DateTime<Utc>) -> Result<User, ValidationError> {
    let password = body.get("password").and_then(Value::as_str);
    if let Some(p) = password {
        if p.chars().count() < SIGN_UP_MIN_PASSWORD {
            return Err(ValidationError::PasswordTooShort { min: SIGN_UP_MIN_PASSWORD });
        }
    }

    let (Some(email), Some(password)) = (text(body, "email"), password) else {
        return Err(ValidationError::MissingCredentials);
    };

    if !email.contains('@') {
        return Err(ValidationError::InvalidEmailFormat);
    }

    if body.get("confirmPassword").and_then(|v| v.as_str()) != Some(password) {
        return Err(ValidationError::PasswordMismatch);
    }

    let mut extra = strip_server_fields(body.clone());
    for key in ["email", "password", "confirmPassword"] {
        extra.remove(key);
    }
    let name = take_string(&mut extra, "name");
    let username = take_string(&mut extra, "username");
    let role = take_string(&mut extra, "role");

    Ok(User {
        name,
        email: email.to_lowercase(),
        password: PasswordCodec::encode(password),
        username,
        role,
        created_at: now,
        updated_at: None,
        extra,
    })
}

/// Validate a sign-in payload.
pub fn sign_in(body: &Document) -> Result<Credentials, ValidationError> {
    match (text(body, "email"), text(body, "password")) {
        (Some(email), Some(password)) => Ok(Credentials {
            email: email.to_lowercase(),
            password: password.to_string(),
        }),
        _ => Err(ValidationError::MissingCredentials),
    }
}

/// Remove `key` when it holds a string; leave other types in place.
fn take_string(doc: &mut Document, key: &str) -> Option<String> {
    match doc.get(key) {
        Some(Value::String(_)) => match doc.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn sign_up_normalizes_email_and_encodes_password() {
        let user = sign_up(
            &body(json!({
                "name": "Test User",
                "email": "A@B.com",
                "password": "12345678",
                "confirmPassword": "12345678",
                "phone": "555"
            })),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.password, PasswordCodec::encode("12345678"));
        assert_eq!(user.name.as_deref(), Some("Test User"));
        assert_eq!(user.extra.get("phone"), Some(&json!("555")));
        assert!(!user.extra.contains_key("confirmPassword"));
    }

    #[test]
    fn sign_up_requires_credentials() {
        let missing_email = body(json!({"password": "securePass123", "confirmPassword": "securePass123"}));
        assert_eq!(sign_up(&missing_email, Utc::now()).unwrap_err(), ValidationError::MissingCredentials);

        let missing_password = body(json!({"email": "t@e.com", "confirmPassword": "securePass123"}));
        assert_eq!(sign_up(&missing_password, Utc::now()).unwrap_err(), ValidationError::MissingCredentials);
    }

    #[test]
    fn short_password_wins_over_other_failures() {
        for payload in [
            json!({"email": "t@e.com", "password": "short", "confirmPassword": "short"}),
            json!({"password": "short"}),
            json!({"email": "a@b.com", "password": "", "confirmPassword": ""}),
            json!({"password": ""}),
            json!({"email": "no-at-sign", "password": "1234567", "confirmPassword": "different"}),
        ] {
            assert_eq!(
                sign_up(&body(payload), Utc::now()).unwrap_err(),
                ValidationError::PasswordTooShort { min: 8 }
            );
        }
    }

    #[test]
    fn sign_up_rejects_mismatch_and_bad_email() {
        let mismatch = body(json!({"email": "t@e.com", "password": "securePass123", "confirmPassword": "different123"}));
        assert_eq!(sign_up(&mismatch, Utc::now()).unwrap_err(), ValidationError::PasswordMismatch);

        let bad_email = body(json!({"email": "nope", "password": "securePass123", "confirmPassword": "securePass123"}));
        assert_eq!(sign_up(&bad_email, Utc::now()).unwrap_err(), ValidationError::InvalidEmailFormat);
    }

    #[test]
    fn sign_up_drops_client_supplied_server_fields() {
        let user = sign_up(
            &body(json!({
                "email": "x@y.z",
                "password": "12345678",
                "confirmPassword": "12345678",
                "_id": "507f1f77bcf86cd799439011",
                "createdAt": "1999-01-01"
            })),
            Utc::now(),
        )
        .unwrap();
        assert!(user.extra.is_empty());
    }

    #[test]
    fn sign_in_lowercases_email() {
        let creds = sign_in(&body(json!({"email": "MiXeD@Case.COM", "password": "pw"}))).unwrap();
        assert_eq!(creds.email, "mixed@case.com");
        assert_eq!(sign_in(&body(json!({"email": "a@b.com"}))).unwrap_err(), ValidationError::MissingCredentials);
        assert_eq!(sign_in(&body(json!({"password": "x"}))).unwrap_err(), ValidationError::MissingCredentials);
    }
}
