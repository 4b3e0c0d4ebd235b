//! Builder API for creating check-in rules.

use crate::core::Guard;
use crate::policy::context::CheckInContext;
use crate::policy::rules::{CheckInCheck, CheckInRules};
use crate::policy::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating check-in rules
pub struct CheckInRulesBuilder {
    max_active: Option<usize>,
    required_checks: Vec<CheckInCheck>,
}

impl CheckInRulesBuilder {
    pub fn new() -> Self {
        Self {
            max_active: None,
            required_checks: Vec::new(),
        }
    }

    /// Refuse check-ins once `max` users are active
    pub fn max_active(mut self, max: usize) -> Self {
        self.max_active = Some(max);
        self
    }

    /// Add a custom validation check
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&CheckInContext) -> Validation<(), NonEmptyVec<Violation>> + Send + Sync + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with error message
    pub fn require_pred<F>(self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&CheckInContext) -> bool + Send + Sync + 'static,
    {
        self.require_guard(Guard::new(predicate), error_msg)
    }

    /// Add a guard; requests it refuses fail with `error_msg`
    pub fn require_guard(mut self, guard: Guard<CheckInContext>, error_msg: String) -> Self {
        let check = move |ctx: &CheckInContext| {
            if guard.check(ctx) {
                Validation::success(())
            } else {
                Validation::fail(Violation::Custom {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Build the rules
    pub fn build(self) -> CheckInRules {
        CheckInRules {
            max_active: self.max_active,
            required_checks: self.required_checks,
        }
    }
}

impl Default for CheckInRulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
