//! Assertions for widget test procedures.

use std::fmt::Display;

use crate::result::{ProbeError, ProbeResult};

/// Result of an assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Expected value, rendered
    pub expected: String,
    /// Actual value, rendered
    pub actual: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            expected: String::new(),
            actual: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            passed: false,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Turn a failure into `AssertionFailed` labelled with `what`
    pub fn check(self, what: &str) -> ProbeResult<()> {
        if self.passed {
            return Ok(());
        }
        tracing::warn!(
            check = what,
            expected = %self.expected,
            actual = %self.actual,
            "assertion failed"
        );
        Err(ProbeError::AssertionFailed {
            step: what.to_string(),
            expected: self.expected,
            actual: self.actual,
        })
    }
}

/// Assertion helpers
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Display + ?Sized>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(expected.to_string(), actual.to_string())
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool) -> AssertionResult {
        Self::equals(&true, &condition)
    }
}
