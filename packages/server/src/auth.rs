//! Basic-auth credential check for the API endpoints.
//!
//! Header parsing is thin plumbing; the actual check is an opaque lookup
//! against the `users` collection via `queries::find_user`. Auth is off by
//! default and enabled with `SAMPLE_MAP_REQUIRE_AUTH`.

use actix_web::HttpRequest;
use actix_web::http::header::AUTHORIZATION;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sample_map_database::queries;
use switchy_database::Database;

/// Whether the API requires credentials, from `SAMPLE_MAP_REQUIRE_AUTH`.
#[must_use]
pub fn auth_required() -> bool {
    std::env::var("SAMPLE_MAP_REQUIRE_AUTH")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Parses an `Authorization: Basic` header value into `(username,
/// password)`.
#[must_use]
pub fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim().as_bytes()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Checks the request's credentials against the user store.
///
/// Returns `true` when auth is disabled or the credentials match a stored
/// user. A missing or unparsable header and a store miss are both
/// rejections; a store error is logged and rejected.
pub async fn is_authorized(db: &dyn Database, req: &HttpRequest) -> bool {
    if !auth_required() {
        return true;
    }

    let Some(header) = req.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        return false;
    };
    let Some((username, password)) = decode_basic(header) else {
        return false;
    };

    match queries::find_user(db, &username, &password).await {
        Ok(user) => user.is_some(),
        Err(e) => {
            log::error!("Credential lookup failed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_basic_header() {
        // "alice:s3cret"
        let creds = decode_basic("Basic YWxpY2U6czNjcmV0").unwrap();
        assert_eq!(creds, ("alice".to_string(), "s3cret".to_string()));
    }

    #[test]
    fn password_may_contain_colons() {
        // "alice:a:b"
        let creds = decode_basic("Basic YWxpY2U6YTpi").unwrap();
        assert_eq!(creds, ("alice".to_string(), "a:b".to_string()));
    }

    #[test]
    fn rejects_non_basic_scheme() {
        assert!(decode_basic("Bearer YWxpY2U6czNjcmV0").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_basic("Basic !!!not-base64!!!").is_none());
    }

    #[test]
    fn rejects_missing_colon() {
        // "alice"
        assert!(decode_basic("Basic YWxpY2U=").is_none());
    }
}
