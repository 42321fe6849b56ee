use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::outcome::{ErrorCode, ProvisionFailure};

type HmacSha256 = Hmac<Sha256>;

const API_KEY_HEADER: &str = "x-api-key";
const TAG_KEY: &[u8] = b"repo-crafter-api-key";

/// Pull the caller's API key from `X-API-Key`, falling back to
/// `Authorization: Bearer <key>`. Empty values count as absent.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    header_value(headers, API_KEY_HEADER)
        .or_else(|| {
            header_value(headers, AUTHORIZATION.as_str())
                .and_then(|v| v.strip_prefix("Bearer "))
                .filter(|v| !v.is_empty())
        })
        .map(str::to_string)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Check the presented key against the configured one.
///
/// `expected` is `None` when authentication is disabled, in which case any
/// key (or none) is accepted.
pub fn authenticate(expected: Option<&str>, presented: Option<&str>) -> Result<(), ProvisionFailure> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = presented.ok_or_else(|| {
        ProvisionFailure::new(
            ErrorCode::MissingApiKey,
            "API key is required. Provide it in 'X-API-Key' header or 'Authorization: Bearer <key>' header",
        )
    })?;

    if !keys_match(expected, presented) {
        return Err(ProvisionFailure::new(
            ErrorCode::InvalidApiKey,
            "Invalid API key provided",
        ));
    }

    Ok(())
}

/// Exact-match comparison that does not leak the position of the first
/// differing byte: both keys are reduced to HMAC tags and the tags are
/// compared in constant time.
fn keys_match(expected: &str, presented: &str) -> bool {
    let (Ok(mut expected_mac), Ok(mut presented_mac)) = (
        HmacSha256::new_from_slice(TAG_KEY),
        HmacSha256::new_from_slice(TAG_KEY),
    ) else {
        tracing::error!("Failed to initialise HMAC for API key comparison");
        return false;
    };

    expected_mac.update(expected.as_bytes());
    presented_mac.update(presented.as_bytes());

    let expected_tag = expected_mac.finalize().into_bytes();
    presented_mac.verify_slice(&expected_tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_extract_from_api_key_header() {
        assert_eq!(
            extract_api_key(&headers(&[("x-api-key", "k1")])).as_deref(),
            Some("k1")
        );
    }

    #[test]
    fn test_extract_from_bearer_header() {
        assert_eq!(
            extract_api_key(&headers(&[("authorization", "Bearer k2")])).as_deref(),
            Some("k2")
        );
        assert_eq!(extract_api_key(&headers(&[("authorization", "Basic abc")])), None);
        assert_eq!(extract_api_key(&headers(&[("authorization", "Bearer ")])), None);
    }

    #[test]
    fn test_api_key_header_takes_precedence() {
        let map = headers(&[("x-api-key", "dedicated"), ("authorization", "Bearer bearer")]);
        assert_eq!(extract_api_key(&map).as_deref(), Some("dedicated"));
    }

    #[test]
    fn test_empty_api_key_header_falls_back_to_bearer() {
        let map = headers(&[("x-api-key", ""), ("authorization", "Bearer bearer")]);
        assert_eq!(extract_api_key(&map).as_deref(), Some("bearer"));
    }

    #[test]
    fn test_authenticate_disabled_accepts_anything() {
        assert!(authenticate(None, None).is_ok());
        assert!(authenticate(None, Some("whatever")).is_ok());
    }

    #[test]
    fn test_authenticate_missing_key() {
        let err = authenticate(Some("secret"), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingApiKey);
    }

    #[test]
    fn test_authenticate_wrong_key() {
        for presented in ["wrong", "secre", "secret ", "SECRET"] {
            let err = authenticate(Some("secret"), Some(presented)).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidApiKey);
        }
    }

    #[test]
    fn test_authenticate_correct_key() {
        assert!(authenticate(Some("secret"), Some("secret")).is_ok());
    }

    #[test]
    fn test_keys_match_is_exact() {
        let long = "k".repeat(200);
        assert!(keys_match(&long, &long));
        assert!(!keys_match(&long, &long[..199]));
        assert!(keys_match("", ""));
        assert!(!keys_match("secret", ""));
    }
}
