//! Domain Entities
//!
//! Core types that flow through one verification attempt.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::host::HostSession;
use crate::domain::value_objects::{DeviceFingerprint, InitDataToken, TelegramId};

/// Mini-app session, fixed for the duration of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub telegram_id: TelegramId,
    pub init_data: InitDataToken,
    pub username: String,
}

impl Session {
    /// Build a session from what the host reports
    ///
    /// Returns `None` when the user id or init-data token is missing.
    /// A missing username falls back to `username_sentinel`.
    pub fn from_host(raw: HostSession, username_sentinel: &str) -> Option<Self> {
        let telegram_id = raw.user_id.and_then(TelegramId::new)?;
        let init_data = InitDataToken::new(raw.init_data)?;
        let username = raw
            .username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| username_sentinel.to_string());

        Some(Self {
            telegram_id,
            init_data,
            username,
        })
    }
}

/// One outbound verification call
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub telegram_id: TelegramId,
    pub init_data: InitDataToken,
    pub fingerprint: Option<DeviceFingerprint>,
}

impl VerificationRequest {
    pub fn new(session: &Session, fingerprint: Option<DeviceFingerprint>) -> Self {
        Self {
            telegram_id: session.telegram_id,
            init_data: session.init_data.clone(),
            fingerprint,
        }
    }

    /// Query parameters in wire order; `fingerprint` is omitted when absent
    ///
    /// Values are raw; the HTTP client percent-encodes them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("user_id", self.telegram_id.to_string()),
            ("bot_token", self.init_data.expose().to_string()),
        ];
        if let Some(fingerprint) = &self.fingerprint {
            pairs.push(("fingerprint", fingerprint.as_str().to_string()));
        }
        pairs
    }
}

/// Suspicion flags reported by the verifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub vpn: bool,
    pub multi_account: bool,
}

impl Flags {
    /// Read `flags` leniently; a flag is set only by a literal `true`
    ///
    /// Both `multi_account` and `multiAccount` are accepted.
    fn from_body(body: &Map<String, Value>) -> Self {
        let Some(flags) = body.get("flags").and_then(Value::as_object) else {
            return Self::default();
        };
        let is_true = |key: &str| flags.get(key).and_then(Value::as_bool).unwrap_or(false);

        Self {
            vpn: is_true("vpn"),
            multi_account: is_true("multi_account") || is_true("multiAccount"),
        }
    }
}

/// Verifier response body
///
/// The JSON object is kept exactly as received and relayed to the bot
/// unchanged; `success`, `error` and `flags` are read views over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationResult {
    body: Map<String, Value>,
}

impl VerificationResult {
    pub fn success(&self) -> bool {
        self.body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Server-supplied reason; non-string values are ignored
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    pub fn flags(&self) -> Flags {
        Flags::from_body(&self.body)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }
}

/// A verification result known to carry `success == true`
///
/// Only the verification client can produce one, so a payload can
/// never be built from a failed result.
#[derive(Debug, Clone, PartialEq)]
pub struct Verified(VerificationResult);

impl Verified {
    pub(crate) fn new(result: VerificationResult) -> Option<Self> {
        result.success().then_some(Self(result))
    }

    pub fn result(&self) -> &VerificationResult {
        &self.0
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_flags(&self.0.flags())
    }
}

/// Final reading of the verifier flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    VpnDetected,
    SuspiciousActivity,
}

impl Verdict {
    /// VPN takes precedence over multi-account
    pub fn from_flags(flags: &Flags) -> Self {
        if flags.vpn {
            Verdict::VpnDetected
        } else if flags.multi_account {
            Verdict::SuspiciousActivity
        } else {
            Verdict::Clean
        }
    }
}

/// Payload status; the only value ever sent is `completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Completed,
}

/// Body of the single POST to the bot destination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    pub status: CompletionStatus,
    pub verification_data: VerificationResult,
    pub telegram_id: TelegramId,
    pub username: String,
}

impl WebhookPayload {
    pub fn completed(session: &Session, verified: &Verified) -> Self {
        Self {
            status: CompletionStatus::Completed,
            verification_data: verified.result().clone(),
            telegram_id: session.telegram_id,
            username: session.username.clone(),
        }
    }
}

/// Aggregate counters shown on the stats screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub today: u64,
    pub yesterday: u64,
    pub total: u64,
    pub online: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host_session(user_id: Option<i64>, username: Option<&str>) -> HostSession {
        HostSession {
            user_id,
            init_data: "query_id=1&hash=ff".to_string(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_session_requires_user_id() {
        assert!(Session::from_host(host_session(None, Some("alice")), "no_username").is_none());
        assert!(Session::from_host(host_session(Some(0), None), "no_username").is_none());
    }

    #[test]
    fn test_session_requires_init_data() {
        let raw = HostSession {
            user_id: Some(1),
            init_data: String::new(),
            username: None,
        };
        assert!(Session::from_host(raw, "no_username").is_none());
    }

    #[test]
    fn test_session_username_sentinel() {
        let session = Session::from_host(host_session(Some(7), None), "no_username").unwrap();
        assert_eq!(session.username, "no_username");

        let session =
            Session::from_host(host_session(Some(7), Some("alice")), "no_username").unwrap();
        assert_eq!(session.username, "alice");
    }

    #[test]
    fn test_query_pairs_omit_absent_fingerprint() {
        let session = Session::from_host(host_session(Some(42), None), "x").unwrap();

        let without = VerificationRequest::new(&session, None).query_pairs();
        assert_eq!(without.len(), 2);
        assert!(without.iter().all(|(k, _)| *k != "fingerprint"));

        let with = VerificationRequest::new(&session, DeviceFingerprint::new("fp-1"))
            .query_pairs();
        assert_eq!(with[0], ("user_id", "42".to_string()));
        assert_eq!(with[2], ("fingerprint", "fp-1".to_string()));
    }

    fn result(body: Value) -> VerificationResult {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_result_relayed_verbatim() {
        let body = json!({
            "success": true,
            "error": null,
            "flags": { "vpn": false, "multiAccount": true, "tor": false },
            "risk_score": 0.12,
            "country": "DE"
        });
        let parsed = result(body.clone());
        assert!(parsed.flags().multi_account);
        assert_eq!(parsed.error(), None);

        assert_eq!(serde_json::to_value(&parsed).unwrap(), body);
    }

    #[test]
    fn test_result_accepts_both_multi_account_spellings() {
        let parsed = result(json!({
            "success": true,
            "flags": { "vpn": false, "multiAccount": true, "multi_account": true }
        }));
        assert!(parsed.success());
        assert_eq!(
            parsed.flags(),
            Flags {
                vpn: false,
                multi_account: true
            }
        );

        let snake_only = result(json!({ "success": true, "flags": { "multi_account": true } }));
        assert!(snake_only.flags().multi_account);
    }

    #[test]
    fn test_result_lenient_field_types() {
        let parsed = result(json!({
            "success": "yes",
            "error": 17,
            "flags": { "vpn": 1 }
        }));
        assert!(!parsed.success());
        assert_eq!(parsed.error(), None);
        assert_eq!(parsed.flags(), Flags::default());
    }

    #[test]
    fn test_result_rejects_non_object_body() {
        assert!(serde_json::from_value::<VerificationResult>(json!([true])).is_err());
    }

    #[test]
    fn test_result_missing_flags_defaults_clean() {
        let parsed = result(json!({"success": true}));
        assert_eq!(Verdict::from_flags(&parsed.flags()), Verdict::Clean);
    }

    #[test]
    fn test_verified_requires_success() {
        let failed = VerificationResult::default();
        assert!(Verified::new(failed).is_none());
    }

    #[test]
    fn test_verdict_precedence() {
        let both = Flags {
            vpn: true,
            multi_account: true,
        };
        assert_eq!(Verdict::from_flags(&both), Verdict::VpnDetected);

        let multi = Flags {
            vpn: false,
            multi_account: true,
        };
        assert_eq!(Verdict::from_flags(&multi), Verdict::SuspiciousActivity);
    }

    #[test]
    fn test_payload_wire_shape() {
        let session = Session::from_host(host_session(Some(123), Some("bob")), "x").unwrap();
        let verified = Verified::new(result(json!({ "success": true, "error": null }))).unwrap();

        let body = serde_json::to_value(WebhookPayload::completed(&session, &verified)).unwrap();
        assert_eq!(body["status"], json!("completed"));
        assert_eq!(body["telegram_id"], json!(123));
        assert_eq!(body["username"], json!("bob"));
        assert_eq!(
            body["verification_data"],
            json!({ "success": true, "error": null })
        );
    }
}
