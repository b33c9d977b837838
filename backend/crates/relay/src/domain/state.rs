//! Orchestration State Machine
//!
//! `Idle -> InFlight -> {Succeeded | Failed}`, with `Failed -> Idle`.
//! `Succeeded` is terminal for the session.

/// State of the verification orchestrator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrchestrationState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl OrchestrationState {
    /// Enter `InFlight` if a new attempt may start
    ///
    /// `Failed` resets through `Idle` first. Returns `false` and leaves the
    /// state untouched while an attempt is in flight or after success.
    pub fn start(&mut self) -> bool {
        if *self == OrchestrationState::Failed {
            *self = OrchestrationState::Idle;
        }
        if *self != OrchestrationState::Idle {
            return false;
        }
        *self = OrchestrationState::InFlight;
        true
    }

    /// `InFlight -> Succeeded`
    pub fn succeed(&mut self) {
        debug_assert_eq!(*self, OrchestrationState::InFlight);
        *self = OrchestrationState::Succeeded;
    }

    /// `InFlight -> Failed`
    pub fn fail(&mut self) {
        debug_assert_eq!(*self, OrchestrationState::InFlight);
        *self = OrchestrationState::Failed;
    }

    /// Whether the user may trigger an attempt
    pub fn retry_enabled(&self) -> bool {
        matches!(self, OrchestrationState::Idle | OrchestrationState::Failed)
    }

    pub fn is_terminal(&self) -> bool {
        *self == OrchestrationState::Succeeded
    }
}
