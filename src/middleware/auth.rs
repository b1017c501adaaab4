use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::PasswordCodec;
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::handlers::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// HTTP Basic authentication against the stored users.
///
/// Missing and wrong credentials get the same message so callers cannot
/// probe which emails are registered.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (email, password) = extract_basic_credentials(&headers)?;

    let user = state
        .store
        .find_one(Collection::Users, &Filter::new().eq("email", email.to_lowercase()))
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let stored = user
        .get("password")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    // Stored values that no longer decode count as a mismatch, not a server fault
    match PasswordCodec::decode(stored) {
        Ok(plain) if plain == password => {}
        Ok(_) => return Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
        Err(e) => {
            tracing::warn!("Undecodable stored password for {}: {}", email, e);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    }

    Ok(next.run(request).await)
}

/// Split `Authorization: Basic base64(email:password)` at the first colon.
fn extract_basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let encoded = auth_str
        .strip_prefix("Basic ")
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let decoded = PasswordCodec::decode(encoded.trim())
        .map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    match decoded.split_once(':') {
        Some((email, password)) if !email.is_empty() => Ok((email.to_string(), password.to_string())),
        _ => Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_email_and_password() {
        let value = format!("Basic {}", PasswordCodec::encode("a@b.com:pa:ss"));
        let (email, password) = extract_basic_credentials(&headers(&value)).unwrap();
        assert_eq!(email, "a@b.com");
        assert_eq!(password, "pa:ss");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(extract_basic_credentials(&HeaderMap::new()).is_err());
        assert!(extract_basic_credentials(&headers("Bearer abc")).is_err());
        assert!(extract_basic_credentials(&headers("Basic !!!")).is_err());
        let no_colon = format!("Basic {}", PasswordCodec::encode("nocolon"));
        assert!(extract_basic_credentials(&headers(&no_colon)).is_err());
    }
}
