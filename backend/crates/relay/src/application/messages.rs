//! User-visible status messages
//!
//! Failure messages live on `OrchestrationError::user_message`.

use crate::domain::entities::Verdict;

pub const RUNNING_CHECKS: &str = "🔍 Running security checks...";
pub const VPN_DETECTED: &str = "⚠️ VPN Detected";
pub const SUSPICIOUS_ACTIVITY: &str = "⚠️ Suspicious Activity";
pub const VERIFICATION_COMPLETE: &str = "✅ Verification Complete";

/// Final message for a delivered verification
pub fn verdict_message(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::VpnDetected => VPN_DETECTED,
        Verdict::SuspiciousActivity => SUSPICIOUS_ACTIVITY,
        Verdict::Clean => VERIFICATION_COMPLETE,
    }
}
