use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::{config::AdminConfig, error::AppError};

/// Admission check for the `/admin` route tree. Runs on every request; no
/// session state is kept. The username comparison is constant-time so it
/// leaks no more than the bcrypt verification next to it.
pub async fn require_basic_auth(
    State(admin): State<AdminConfig>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let (username, password) = parse_basic_credentials(header)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let username_ok = bool::from(username.as_bytes().ct_eq(admin.username.as_bytes()));

    // bcrypt is deliberately slow; keep it off the async worker threads.
    let hash = admin.password_hash.clone();
    let password_ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))?
        .unwrap_or(false);

    if !(username_ok && password_ok) {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}

/// Decodes `Basic base64(username:password)`, splitting on the first `:`.
/// Any malformed header counts as an authentication failure.
fn parse_basic_credentials(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    fn encode(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn decodes_username_and_password() {
        let creds = parse_basic_credentials(&encode("admin:hunter2")).unwrap();
        assert_eq!(creds, ("admin".to_string(), "hunter2".to_string()));
    }

    #[test]
    fn splits_on_the_first_colon_only() {
        let creds = parse_basic_credentials(&encode("admin:pass:word")).unwrap();
        assert_eq!(creds, ("admin".to_string(), "pass:word".to_string()));
    }

    #[test]
    fn rejects_non_basic_schemes() {
        assert!(parse_basic_credentials("Bearer abc123").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(parse_basic_credentials("Basic not-base64!").is_none());
    }

    #[test]
    fn rejects_payload_without_a_colon() {
        assert!(parse_basic_credentials(&encode("admin")).is_none());
    }
}
