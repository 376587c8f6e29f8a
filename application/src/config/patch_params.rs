//! Patch parameters - use case behavior control.
//!
//! [`PatchParams`] groups the static parameters that control
//! [`ApplyQuizPatchUseCase`](crate::use_cases::apply_quiz_patch::ApplyQuizPatchUseCase).

use quizpatch_domain::PatchLimits;
use serde::{Deserialize, Serialize};

/// Patch use case parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchParams {
    /// Text limits enforced by the reconciler.
    pub limits: PatchLimits,
    /// Reconcile and report the result without saving it.
    pub dry_run: bool,
}

impl PatchParams {
    // ==================== Builder Methods ====================

    pub fn with_limits(mut self, limits: PatchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = PatchParams::default();
        assert_eq!(params.limits, PatchLimits::default());
        assert!(!params.dry_run);
    }

    #[test]
    fn test_builder() {
        let params = PatchParams::default()
            .with_limits(PatchLimits::default().with_max_title_len(10))
            .with_dry_run(true);
        assert_eq!(params.limits.max_title_len, 10);
        assert!(params.dry_run);
    }
}
