//! Quota calculator.
//!
//! Pure: it computes the new cumulative usage or refuses, and never writes.
//! Callers persist the returned value only after the file's bytes have been
//! written, so a failed upload is never charged.

use std::sync::Arc;

use sharehub_core::error::AppError;
use sharehub_core::types::PrincipalKind;

use super::plan::PlanCatalog;

/// Evaluates uploads against plan ceilings.
#[derive(Debug, Clone)]
pub struct QuotaCalculator {
    catalog: Arc<PlanCatalog>,
}

impl QuotaCalculator {
    /// Creates a calculator over a plan catalog.
    pub fn new(catalog: Arc<PlanCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the usage after accepting `candidate` bytes on top of `used`.
    ///
    /// Fails with `PlanMissing` for an empty or unknown plan and with
    /// `QuotaExceeded` when the file cannot fit.
    pub fn evaluate(
        &self,
        kind: PrincipalKind,
        plan: &str,
        used: u64,
        candidate: u64,
    ) -> Result<u64, AppError> {
        let resolved = self.catalog.resolve(kind, plan)?;
        Self::charge(resolved.limits.storage_bytes, used, candidate)
    }

    /// Applies the ceiling rules to raw numbers. Both bounds are inclusive.
    pub fn charge(ceiling: u64, used: u64, candidate: u64) -> Result<u64, AppError> {
        if candidate > ceiling {
            return Err(AppError::quota_exceeded(format!(
                "File size {candidate} bytes exceeds the plan's total storage of {ceiling} bytes"
            )));
        }

        let remaining = ceiling.saturating_sub(used);
        if candidate > remaining {
            return Err(AppError::quota_exceeded(format!(
                "File size {candidate} bytes exceeds the remaining storage of {remaining} bytes \
                 ({used} of {ceiling} bytes used)"
            )));
        }

        Ok(used + candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharehub_core::error::ErrorKind;

    const FREE_CEILING: u64 = 2 * 1024 * 1024 * 1024;

    fn calculator() -> QuotaCalculator {
        QuotaCalculator::new(Arc::new(PlanCatalog::default()))
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        let used = FREE_CEILING - 100;
        let total = calculator()
            .evaluate(PrincipalKind::Individual, "free", used, 100)
            .unwrap();
        assert_eq!(total, FREE_CEILING);
    }

    #[test]
    fn test_one_byte_over_is_rejected() {
        let err = calculator()
            .evaluate(PrincipalKind::Individual, "free", FREE_CEILING - 100, 101)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    }

    #[test]
    fn test_headroom_message_carries_both_numbers() {
        let err = calculator()
            .evaluate(PrincipalKind::Individual, "free", FREE_CEILING - 100, 150)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert!(err.message.contains("150"));
        assert!(err.message.contains("remaining storage of 100 bytes"));
    }

    #[test]
    fn test_file_larger_than_plan_is_distinct() {
        let err = calculator()
            .evaluate(PrincipalKind::Team, "free", 0, 10 * 1024 * 1024 * 1024 + 1)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
        assert!(err.message.contains("total storage"));
    }

    #[test]
    fn test_plan_missing_is_surfaced() {
        let err = calculator()
            .evaluate(PrincipalKind::Individual, "", 0, 1)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PlanMissing);
    }

    #[test]
    fn test_charge_matches_rule_over_grid() {
        let ceiling: u64 = 1000;
        for used in [0, 1, 500, 999, 1000, 1200] {
            for candidate in [0, 1, 499, 500, 501, 1000, 1001] {
                let expected_ok = candidate <= ceiling && candidate <= ceiling.saturating_sub(used);
                let result = QuotaCalculator::charge(ceiling, used, candidate);
                assert_eq!(result.is_ok(), expected_ok, "used={used} candidate={candidate}");
                if let Ok(total) = result {
                    assert_eq!(total, used + candidate);
                }
            }
        }
    }
}
