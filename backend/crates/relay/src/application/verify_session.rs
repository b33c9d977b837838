//! Verify Session Use Case
//!
//! Builds the verification request, races it against the deadline and
//! interprets the verifier's answer.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Session, VerificationRequest, Verified};
use crate::domain::gateway::VerifierGateway;
use crate::domain::value_objects::DeviceFingerprint;
use crate::error::{DEFAULT_REJECTION_REASON, VerificationError};

/// Verification client
pub struct VerificationClient<G>
where
    G: VerifierGateway,
{
    gateway: Arc<G>,
    deadline: Duration,
}

impl<G> VerificationClient<G>
where
    G: VerifierGateway,
{
    pub fn new(gateway: Arc<G>, deadline: Duration) -> Self {
        Self { gateway, deadline }
    }

    /// Run one verification call under the deadline
    ///
    /// When the deadline fires first the gateway future is dropped, which
    /// aborts the in-flight request. Nothing is retried.
    pub async fn verify(
        &self,
        session: &Session,
        fingerprint: Option<DeviceFingerprint>,
    ) -> Result<Verified, VerificationError> {
        let request = VerificationRequest::new(session, fingerprint);

        tracing::debug!(
            telegram_id = %request.telegram_id,
            has_fingerprint = request.fingerprint.is_some(),
            "Sending verification request"
        );

        let result = match tokio::time::timeout(self.deadline, self.gateway.verify(&request)).await
        {
            Ok(outcome) => outcome?,
            Err(_) => {
                tracing::warn!(
                    telegram_id = %request.telegram_id,
                    deadline = ?self.deadline,
                    "Verification deadline exceeded, request aborted"
                );
                return Err(VerificationError::Timeout);
            }
        };

        let rejection = result
            .error()
            .filter(|reason| !reason.trim().is_empty())
            .map(str::to_string);

        match Verified::new(result) {
            Some(verified) => {
                let flags = verified.result().flags();
                tracing::info!(
                    telegram_id = %request.telegram_id,
                    vpn = flags.vpn,
                    multi_account = flags.multi_account,
                    "Verification succeeded"
                );
                Ok(verified)
            }
            None => Err(VerificationError::Rejected(
                rejection.unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::VerificationResult;
    use serde_json::json;
    use crate::domain::host::HostSession;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Gateway fake: answers after `delay` with a canned response
    struct FakeVerifier {
        delay: Duration,
        response: Result<VerificationResult, VerificationError>,
        calls: AtomicUsize,
        last_request: Mutex<Option<VerificationRequest>>,
        dropped_unfinished: Arc<AtomicBool>,
    }

    impl FakeVerifier {
        fn new(delay: Duration, response: Result<VerificationResult, VerificationError>) -> Self {
            Self {
                delay,
                response,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                dropped_unfinished: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    /// Sets the flag if dropped before `finish` is called
    struct DropProbe {
        flag: Arc<AtomicBool>,
        finished: bool,
    }

    impl Drop for DropProbe {
        fn drop(&mut self) {
            if !self.finished {
                self.flag.store(true, Ordering::SeqCst);
            }
        }
    }

    impl VerifierGateway for FakeVerifier {
        async fn verify(
            &self,
            request: &VerificationRequest,
        ) -> Result<VerificationResult, VerificationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            let mut probe = DropProbe {
                flag: self.dropped_unfinished.clone(),
                finished: false,
            };
            tokio::time::sleep(self.delay).await;
            probe.finished = true;
            self.response.clone()
        }
    }

    fn session() -> Session {
        Session::from_host(
            HostSession {
                user_id: Some(123),
                init_data: "query_id=1&hash=ab".to_string(),
                username: Some("alice".to_string()),
            },
            "no_username",
        )
        .unwrap()
    }

    fn ok_result() -> VerificationResult {
        serde_json::from_value(json!({ "success": true, "flags": {} })).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_within_deadline() {
        let gateway = Arc::new(FakeVerifier::new(Duration::from_secs(2), Ok(ok_result())));
        let client = VerificationClient::new(gateway.clone(), Duration::from_secs(8));

        let verified = client
            .verify(&session(), DeviceFingerprint::new("fp"))
            .await
            .unwrap();

        assert!(verified.result().success());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        let request = gateway.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.fingerprint.unwrap().as_str(), "fp");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_slow_call() {
        let gateway = Arc::new(FakeVerifier::new(Duration::from_secs(30), Ok(ok_result())));
        let client = VerificationClient::new(gateway.clone(), Duration::from_secs(8));

        let err = client.verify(&session(), None).await.unwrap_err();

        assert_eq!(err, VerificationError::Timeout);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert!(
            gateway.dropped_unfinished.load(Ordering::SeqCst),
            "Losing call must be dropped, not left running"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_uses_server_reason() {
        let result: VerificationResult =
            serde_json::from_value(json!({ "success": false, "error": "Device banned" })).unwrap();
        let gateway = Arc::new(FakeVerifier::new(Duration::ZERO, Ok(result)));
        let client = VerificationClient::new(gateway, Duration::from_secs(8));

        let err = client.verify(&session(), None).await.unwrap_err();
        assert_eq!(err, VerificationError::Rejected("Device banned".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_falls_back_to_generic_reason() {
        let gateway = Arc::new(FakeVerifier::new(
            Duration::ZERO,
            Ok(VerificationResult::default()),
        ));
        let client = VerificationClient::new(gateway, Duration::from_secs(8));

        let err = client.verify(&session(), None).await.unwrap_err();
        assert_eq!(
            err,
            VerificationError::Rejected(DEFAULT_REJECTION_REASON.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_api_error_surfaces_unchanged() {
        let gateway = Arc::new(FakeVerifier::new(
            Duration::ZERO,
            Err(VerificationError::ApiError(503)),
        ));
        let client = VerificationClient::new(gateway.clone(), Duration::from_secs(8));

        let err = client.verify(&session(), None).await.unwrap_err();
        assert_eq!(err, VerificationError::ApiError(503));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1, "No internal retry");
    }
}
