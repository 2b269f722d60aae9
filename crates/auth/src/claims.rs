//! Credential codec: reads the claim set out of a three-segment bearer token.
//!
//! The middle segment is base64url-decoded and JSON-parsed; no signature is
//! checked anywhere in this module. Every structural failure collapses to
//! `None` — a caller can never observe a panic or an error value from a
//! malformed token, only the fail-closed outcome ("undecodable, so expired").

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::time::Duration;

/// Decoded (not verified) claim set of a bearer credential.
///
/// Only the fields this client actually reads are modeled; everything else the
/// server put in the token passes through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimSet {
    /// Expiry instant in epoch seconds. A non-numeric `exp` reads as absent,
    /// and an absent `exp` means the credential is expired by definition.
    #[serde(default, deserialize_with = "lenient_epoch")]
    pub exp: Option<i64>,

    /// Role claim as issued; folding into an effective role happens elsewhere.
    #[serde(default)]
    pub role: Option<String>,

    /// Subject identifier (the server issues `user_id`; a `sub` claim passes
    /// through `extra` and is consulted as a fallback).
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Unknown claims, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimSet {
    /// Expiry instant in epoch milliseconds, if the token carries one.
    /// An `exp` too large to represent in milliseconds reads as absent, so
    /// it falls into the fail-closed path like any other unreadable expiry.
    pub fn expiry_millis(&self) -> Option<i64> {
        self.exp.and_then(|secs| secs.checked_mul(1000))
    }

    /// Subject identifier, preferring the `user_id` claim over `sub`.
    pub fn subject(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .or_else(|| self.extra.get("sub").and_then(Value::as_str))
    }
}

/// Accept integer or float epoch values; anything else reads as absent rather
/// than failing the whole claim set.
fn lenient_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| value.as_f64().map(|f| f as i64)))
}

/// Decode a credential's claim set.
///
/// Requires exactly three dot-separated segments; the middle segment must be
/// valid base64url and valid JSON. Any violation yields `None`.
pub fn decode(token: &str) -> Option<ClaimSet> {
    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!("credential does not have exactly three segments");
        return None;
    };

    let bytes = match URL_SAFE_NO_PAD.decode(payload) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "credential payload is not valid base64url");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!(error = %err, "credential payload is not a valid claim set");
            None
        }
    }
}

/// Whether the credential is expired at `now`.
///
/// Fail-closed: an undecodable token, or one without a readable `exp`, is
/// expired by definition. Otherwise expired iff `now >= exp` (seconds
/// converted to milliseconds before comparing).
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    let Some(expiry_ms) = decode(token).and_then(|c| c.expiry_millis()) else {
        return true;
    };
    now.timestamp_millis() >= expiry_ms
}

/// Whether the credential is expired against the wall clock.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

/// Time left before the credential expires at `now`; zero once expired or
/// whenever no expiry can be read.
pub fn remaining_lifetime_at(token: &str, now: DateTime<Utc>) -> Duration {
    let Some(expiry_ms) = decode(token).and_then(|c| c.expiry_millis()) else {
        return Duration::ZERO;
    };
    let remaining = expiry_ms - now.timestamp_millis();
    if remaining > 0 {
        Duration::from_millis(remaining as u64)
    } else {
        Duration::ZERO
    }
}

/// Time left before the credential expires, against the wall clock.
pub fn remaining_lifetime(token: &str) -> Duration {
    remaining_lifetime_at(token, Utc::now())
}

/// Role claim of the credential, if present and decodable.
pub fn role_of(token: &str) -> Option<String> {
    decode(token)?.role
}

/// Subject identifier of the credential, if present and decodable.
pub fn subject_of(token: &str) -> Option<String> {
    decode(token).and_then(|c| c.subject().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mint(payload: &serde_json::Value) -> String {
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{body}.c2ln")
    }

    #[test]
    fn decode_reads_known_and_extra_claims() {
        let token = mint(&serde_json::json!({
            "exp": 1_900_000_000,
            "role": "operator",
            "user_id": "42",
            "email": "op@example.com",
            "jti": "abc-123"
        }));

        let claims = decode(&token).unwrap();
        assert_eq!(claims.exp, Some(1_900_000_000));
        assert_eq!(claims.role.as_deref(), Some("operator"));
        assert_eq!(claims.subject(), Some("42"));
        assert_eq!(claims.email.as_deref(), Some("op@example.com"));
        assert_eq!(claims.extra["jti"], "abc-123");
    }

    #[test]
    fn decode_requires_three_segments() {
        assert!(decode("onlyone").is_none());
        assert!(decode("two.parts").is_none());
        assert!(decode("a.b.c.d").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn decode_rejects_bad_base64_and_bad_json() {
        assert!(decode("h.%%%not-base64%%%.s").is_none());

        let not_json = URL_SAFE_NO_PAD.encode("this is not json");
        assert!(decode(&format!("h.{not_json}.s")).is_none());
    }

    #[test]
    fn sub_claim_is_a_fallback_for_user_id() {
        let token = mint(&serde_json::json!({ "sub": "abc" }));
        assert_eq!(subject_of(&token).as_deref(), Some("abc"));

        let token = mint(&serde_json::json!({ "sub": "abc", "user_id": "def" }));
        assert_eq!(subject_of(&token).as_deref(), Some("def"));
    }

    #[test]
    fn expiry_boundary() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let past = mint(&serde_json::json!({ "exp": now.timestamp() - 1 }));
        assert!(is_expired_at(&past, now));

        let future = mint(&serde_json::json!({ "exp": now.timestamp() + 3600 }));
        assert!(!is_expired_at(&future, now));

        // Expiry is inclusive: now == exp counts as expired.
        let exact = mint(&serde_json::json!({ "exp": now.timestamp() }));
        assert!(is_expired_at(&exact, now));
    }

    #[test]
    fn missing_or_unreadable_exp_is_expired() {
        let now = Utc::now();

        let no_exp = mint(&serde_json::json!({ "role": "admin" }));
        assert!(is_expired_at(&no_exp, now));

        let string_exp = mint(&serde_json::json!({ "exp": "tomorrow" }));
        assert!(is_expired_at(&string_exp, now));

        assert!(is_expired_at("garbage", now));
    }

    #[test]
    fn oversized_exp_counts_as_expired_instead_of_overflowing() {
        let now = Utc::now();

        let huge = mint(&serde_json::json!({ "exp": i64::MAX }));
        assert!(is_expired_at(&huge, now));
        assert_eq!(remaining_lifetime_at(&huge, now), Duration::ZERO);

        let negative = mint(&serde_json::json!({ "exp": i64::MIN }));
        assert!(is_expired_at(&negative, now));
    }

    #[test]
    fn non_numeric_exp_does_not_fail_the_whole_decode() {
        let token = mint(&serde_json::json!({ "exp": "tomorrow", "role": "driver" }));
        let claims = decode(&token).unwrap();
        assert_eq!(claims.exp, None);
        assert_eq!(claims.role.as_deref(), Some("driver"));
    }

    #[test]
    fn remaining_lifetime_clamps_at_zero() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let future = mint(&serde_json::json!({ "exp": now.timestamp() + 10 }));
        assert_eq!(
            remaining_lifetime_at(&future, now),
            Duration::from_secs(10)
        );

        let past = mint(&serde_json::json!({ "exp": now.timestamp() - 10 }));
        assert_eq!(remaining_lifetime_at(&past, now), Duration::ZERO);

        assert_eq!(remaining_lifetime_at("not-a-token", now), Duration::ZERO);
    }
}
