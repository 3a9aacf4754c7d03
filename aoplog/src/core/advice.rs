//! Deterministic advice selection.

use crate::core::types::{AdviceDecision, MatchResult, ReplaceMode};

/// Select exactly one advice for a matched method.
///
/// Precedence: replace marker, then default logging, then suppressed
/// logging, then no interception. `replace_mode` is only consulted when the
/// replace marker is present; a marker without a mode proceeds.
pub fn select_advice(result: MatchResult, replace_mode: Option<ReplaceMode>) -> AdviceDecision {
    if result.has_replace_marker {
        return match replace_mode {
            Some(ReplaceMode::NoProceed) => AdviceDecision::ReplaceNoProceed,
            Some(ReplaceMode::Proceed) | None => AdviceDecision::ReplaceAndProceed,
        };
    }
    if !result.in_boundary || result.is_excluded_noise {
        return AdviceDecision::Unmatched;
    }
    if result.has_suppress_marker {
        AdviceDecision::ProceedSilently
    } else {
        AdviceDecision::LogAroundProceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(in_boundary: bool, noise: bool, suppress: bool, replace: bool) -> MatchResult {
        MatchResult {
            in_boundary,
            is_excluded_noise: noise,
            has_suppress_marker: suppress,
            has_replace_marker: replace,
        }
    }

    #[test]
    fn unmarked_in_boundary_logs_around() {
        assert_eq!(
            select_advice(result(true, false, false, false), None),
            AdviceDecision::LogAroundProceed
        );
    }

    #[test]
    fn suppress_marker_proceeds_silently() {
        assert_eq!(
            select_advice(result(true, false, true, false), None),
            AdviceDecision::ProceedSilently
        );
    }

    #[test]
    fn noise_is_unmatched_with_or_without_suppress() {
        assert_eq!(
            select_advice(result(true, true, false, false), None),
            AdviceDecision::Unmatched
        );
        assert_eq!(
            select_advice(result(true, true, true, false), None),
            AdviceDecision::Unmatched
        );
    }

    #[test]
    fn outside_boundary_is_unmatched() {
        assert_eq!(
            select_advice(result(false, false, false, false), None),
            AdviceDecision::Unmatched
        );
        assert_eq!(
            select_advice(result(false, false, true, false), None),
            AdviceDecision::Unmatched
        );
    }

    #[test]
    fn replace_wins_over_everything() {
        for (in_boundary, noise, suppress) in [
            (true, false, false),
            (true, true, true),
            (false, false, true),
        ] {
            let matched = result(in_boundary, noise, suppress, true);
            assert_eq!(
                select_advice(matched, Some(ReplaceMode::Proceed)),
                AdviceDecision::ReplaceAndProceed
            );
            assert_eq!(
                select_advice(matched, Some(ReplaceMode::NoProceed)),
                AdviceDecision::ReplaceNoProceed
            );
        }
    }

    #[test]
    fn replace_mode_is_ignored_without_marker() {
        assert_eq!(
            select_advice(
                result(true, false, false, false),
                Some(ReplaceMode::NoProceed)
            ),
            AdviceDecision::LogAroundProceed
        );
    }

    #[test]
    fn selection_is_stateless() {
        let matched = result(true, false, false, false);
        let first = select_advice(matched, None);
        for _ in 0..3 {
            assert_eq!(select_advice(matched, None), first);
        }
    }
}
