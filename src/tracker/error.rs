//! Reasons the tracker ignores a request.

use crate::core::VisitId;
use crate::policy::Violation;
use thiserror::Error;

/// Errors from the fallible tracker operations.
///
/// The public `check_in` / `check_out` calls never surface these; they log
/// them and leave the tracker unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    #[error("Check-in rejected: {}", describe(.violations))]
    Rejected { violations: Vec<Violation> },

    #[error("No active visit with id '{id}'")]
    UnknownVisit { id: VisitId },

    #[error("Could not generate an unused id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_lists_every_violation() {
        let err = TrackerError::Rejected {
            violations: vec![Violation::EmptyName, Violation::CapacityReached { max: 4 }],
        };

        assert_eq!(
            err.to_string(),
            "Check-in rejected: Name is empty or whitespace-only; Active user limit (4) reached"
        );
    }

    #[test]
    fn unknown_visit_names_the_id() {
        let err = TrackerError::UnknownVisit {
            id: VisitId::new("gone"),
        };
        assert_eq!(err.to_string(), "No active visit with id 'gone'");
    }
}
