//! Check-in rules evaluated with Validation.

use crate::policy::context::CheckInContext;
use crate::policy::violations::Violation;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for validation check functions
pub type CheckInCheck =
    Box<dyn Fn(&CheckInContext) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync>;

/// Rules a check-in request must satisfy.
/// Uses Validation to accumulate ALL violations.
///
/// The non-empty name rule always applies. The active-user limit and any
/// custom checks are opt-in through [`CheckInRulesBuilder`].
///
/// [`CheckInRulesBuilder`]: crate::policy::CheckInRulesBuilder
pub struct CheckInRules {
    pub(crate) max_active: Option<usize>,
    pub(crate) required_checks: Vec<CheckInCheck>,
}

impl CheckInRules {
    /// Only the non-empty name rule; any number of users may be checked in.
    pub fn unbounded() -> Self {
        Self {
            max_active: None,
            required_checks: Vec::new(),
        }
    }

    /// Enforce all rules, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    /// Returns Validation::Failure with ALL violations if any fail.
    pub fn enforce(&self, context: &CheckInContext) -> Validation<(), NonEmptyVec<Violation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<Violation>>> = Vec::new();

        let name_check = if context.trimmed_name().is_empty() {
            Validation::fail(Violation::EmptyName)
        } else {
            Validation::success(())
        };
        checks.push(name_check);

        if let Some(max) = self.max_active {
            let check = if context.active_count >= max {
                Validation::fail(Violation::CapacityReached { max })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(context));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Convenience wrapper around [`enforce`](Self::enforce) that flattens
    /// the outcome into a plain list of violations (empty on success).
    pub fn violations(&self, context: &CheckInContext) -> Vec<Violation> {
        match self.enforce(context) {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    pub fn max_active(&self) -> Option<usize> {
        self.max_active
    }
}

impl Default for CheckInRules {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Debug for CheckInRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckInRules")
            .field("max_active", &self.max_active)
            .field("required_checks", &self.required_checks.len())
            .finish()
    }
}
