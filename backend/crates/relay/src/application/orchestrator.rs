//! Verification Orchestrator
//!
//! Sequences one user-triggered attempt:
//! session guard -> fingerprint -> verify (deadline) -> destination ->
//! webhook POST -> completion signal -> stats refresh -> final message.
//!
//! Owns the single `OrchestrationState`; the state lock is never held
//! across an await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::config::RelayConfig;
use crate::application::messages;
use crate::application::poll_stats::StatsFetcher;
use crate::application::relay_outcome::WebhookRelay;
use crate::application::verify_session::VerificationClient;
use crate::domain::entities::{Session, Verdict, WebhookPayload};
use crate::domain::gateway::{FingerprintSource, StatsSource, VerifierGateway, WebhookGateway};
use crate::domain::host::{HostRuntime, StatusSurface};
use crate::domain::state::OrchestrationState;
use crate::domain::value_objects::Destination;
use crate::error::OrchestrationError;

/// Outcome of one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// An attempt was already in flight, or the session already succeeded
    Ignored,
    Succeeded(Verdict),
    Failed(OrchestrationError),
}

/// Collaborators of the orchestrator
pub struct OrchestratorPorts<G, W, F, S, H, D>
where
    S: StatsSource,
    D: StatusSurface,
{
    pub verifier: Arc<G>,
    pub webhook: Arc<W>,
    pub fingerprints: Arc<F>,
    pub stats: Arc<StatsFetcher<S, D>>,
    pub host: Arc<H>,
    pub surface: Arc<D>,
}

/// Verification orchestrator
pub struct VerificationOrchestrator<G, W, F, S, H, D>
where
    G: VerifierGateway,
    W: WebhookGateway,
    F: FingerprintSource,
    S: StatsSource,
    H: HostRuntime + Send + Sync + 'static,
    D: StatusSurface,
{
    client: VerificationClient<G>,
    relay: WebhookRelay<W, H>,
    fingerprints: Arc<F>,
    stats: Arc<StatsFetcher<S, D>>,
    host: Arc<H>,
    surface: Arc<D>,
    config: Arc<RelayConfig>,
    state: Mutex<OrchestrationState>,
}

impl<G, W, F, S, H, D> VerificationOrchestrator<G, W, F, S, H, D>
where
    G: VerifierGateway,
    W: WebhookGateway,
    F: FingerprintSource,
    S: StatsSource,
    H: HostRuntime + Send + Sync + 'static,
    D: StatusSurface,
{
    pub fn new(ports: OrchestratorPorts<G, W, F, S, H, D>, config: Arc<RelayConfig>) -> Self {
        Self {
            client: VerificationClient::new(ports.verifier, config.verify_deadline),
            relay: WebhookRelay::new(ports.webhook, ports.host.clone(), config.close_grace),
            fingerprints: ports.fingerprints,
            stats: ports.stats,
            host: ports.host,
            surface: ports.surface,
            config,
            state: Mutex::new(OrchestrationState::Idle),
        }
    }

    pub fn state(&self) -> OrchestrationState {
        *self.lock_state()
    }

    /// Handle one press of the verify control
    pub async fn handle_verification(&self) -> AttemptOutcome {
        let session = match self.begin() {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!("Verification already in progress or complete, ignoring trigger");
                return AttemptOutcome::Ignored;
            }
            Err(e) => {
                e.log();
                self.surface.show_message(&e.user_message());
                self.surface.set_retry_enabled(true);
                return AttemptOutcome::Failed(e);
            }
        };

        self.surface.set_retry_enabled(false);
        self.surface.show_message(messages::RUNNING_CHECKS);

        match self.run_attempt(&session).await {
            Ok(verdict) => {
                self.lock_state().succeed();
                self.surface.show_message(messages::verdict_message(verdict));
                tracing::info!(
                    telegram_id = %session.telegram_id,
                    verdict = ?verdict,
                    "Verification attempt completed"
                );
                AttemptOutcome::Succeeded(verdict)
            }
            Err(e) => {
                self.lock_state().fail();
                e.log();
                self.surface.show_message(&e.user_message());
                self.surface.set_retry_enabled(true);
                AttemptOutcome::Failed(e)
            }
        }
    }

    /// Guard the session and enter `InFlight` atomically
    ///
    /// `Ok(None)` when no attempt may start. An invalid session fails
    /// without touching the state.
    fn begin(&self) -> Result<Option<Session>, OrchestrationError> {
        let mut state = self.lock_state();
        if !state.retry_enabled() {
            return Ok(None);
        }

        let session = Session::from_host(self.host.session(), &self.config.username_sentinel)
            .ok_or(OrchestrationError::SessionInvalid)?;

        state.start();
        Ok(Some(session))
    }

    async fn run_attempt(&self, session: &Session) -> Result<Verdict, OrchestrationError> {
        let fingerprint = self.fingerprints.acquire().await;
        if fingerprint.is_none() {
            tracing::debug!("No device fingerprint, verifying without one");
        }

        let verified = self.client.verify(session, fingerprint).await?;

        let destination = self.resolve_destination();
        let payload = WebhookPayload::completed(session, &verified);

        // The remote verification is not repeated if this fails; the user restarts.
        self.relay.deliver(&payload, destination.as_ref()).await?;

        let completion = self.relay.signal_completion(&payload).await;
        if !completion.signalled {
            tracing::warn!(
                telegram_id = %session.telegram_id,
                "Outcome delivered but host did not accept completion signal"
            );
        }

        self.stats.poll().await;

        Ok(verified.verdict())
    }

    fn resolve_destination(&self) -> Option<Destination> {
        self.host
            .page_url()
            .and_then(|page| Destination::from_page(&page, &self.config.destination_param))
    }

    fn lock_state(&self) -> MutexGuard<'_, OrchestrationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
