//! Per-tier attempt log for resolution diagnostics.

use super::traits::{MissReason, Substitution};

/// What happened when a tier was tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Degraded(Substitution),
    Missed(MissReason),
    Fatal(String),
}

/// Record of a single tier attempt during a resolution.
#[derive(Clone, Debug)]
pub struct TierAttempt {
    pub tier: &'static str,
    pub outcome: AttemptOutcome,
}

/// Ordered log of the tiers tried for one resolution.
#[derive(Clone, Debug, Default)]
pub struct ResolutionDiagnostics {
    pub attempts: Vec<TierAttempt>,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    fn push(&mut self, tier: &'static str, outcome: AttemptOutcome) {
        self.attempts.push(TierAttempt { tier, outcome });
    }

    pub fn record_success(&mut self, tier: &'static str) {
        self.push(tier, AttemptOutcome::Success);
    }

    pub fn record_degraded(&mut self, tier: &'static str, substitution: Substitution) {
        self.push(tier, AttemptOutcome::Degraded(substitution));
    }

    pub fn record_miss(&mut self, tier: &'static str, reason: MissReason) {
        self.push(tier, AttemptOutcome::Missed(reason));
    }

    pub fn record_fatal(&mut self, tier: &'static str, error: String) {
        self.push(tier, AttemptOutcome::Fatal(error));
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| match &a.outcome {
                AttemptOutcome::Success => format!("{}: SUCCESS", a.tier),
                AttemptOutcome::Degraded(s) => format!("{}: DEGRADED ({:?})", a.tier, s),
                AttemptOutcome::Missed(r) => format!("{}: MISS ({:?})", a.tier, r),
                AttemptOutcome::Fatal(e) => format!("{}: FATAL ({})", a.tier, e),
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Name of the tier that answered, if any.
    pub fn answered_by(&self) -> Option<&'static str> {
        self.attempts
            .iter()
            .find(|a| {
                matches!(
                    a.outcome,
                    AttemptOutcome::Success | AttemptOutcome::Degraded(_)
                )
            })
            .map(|a| a.tier)
    }

    /// Get all misses.
    pub fn misses(&self) -> Vec<(&'static str, &MissReason)> {
        self.attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Missed(reason) => Some((a.tier, reason)),
                _ => None,
            })
            .collect()
    }
}
