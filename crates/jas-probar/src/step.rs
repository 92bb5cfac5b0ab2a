//! Step recording.
//!
//! Every page-object action and widget procedure runs inside
//! [`StepLog::run`], which opens a `step` tracing span, times the action and
//! appends a [`StepRecord`] to the log. The wrapped action's result is
//! returned untouched. Steps nest: a record's `depth` is the number of steps
//! that were open when it started.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::result::ProbeResult;

/// Status of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step is running
    Running,
    /// Step completed successfully
    Passed,
    /// Step returned an error
    Failed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
        })
    }
}

/// One recorded step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step description
    pub name: String,
    /// Nesting depth
    pub depth: usize,
    /// Step status
    pub status: StepStatus,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Error text for failed steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    fn started(name: &str, depth: usize) -> Self {
        Self {
            name: name.to_string(),
            depth,
            status: StepStatus::Running,
            duration_ms: 0,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
struct StepLogInner {
    records: Vec<StepRecord>,
    depth: usize,
}

/// Shared, append-only log of steps
///
/// Cloning a `StepLog` shares the underlying records, so page objects
/// built with clones of one log report into the same list.
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    inner: Rc<RefCell<StepLogInner>>,
}

impl StepLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` as a named step
    pub fn run<T>(
        &self,
        name: impl Into<String>,
        action: impl FnOnce() -> ProbeResult<T>,
    ) -> ProbeResult<T> {
        let name = name.into();
        let span = tracing::info_span!("step", name = %name);
        let _entered = span.enter();

        let index = {
            let mut inner = self.inner.borrow_mut();
            let depth = inner.depth;
            inner.records.push(StepRecord::started(&name, depth));
            inner.depth += 1;
            inner.records.len() - 1
        };

        let start = Instant::now();
        let result = action();
        let duration_ms = start.elapsed().as_millis() as u64;

        let mut inner = self.inner.borrow_mut();
        inner.depth = inner.depth.saturating_sub(1);
        if let Some(record) = inner.records.get_mut(index) {
            record.duration_ms = duration_ms;
            match &result {
                Ok(_) => {
                    record.status = StepStatus::Passed;
                    tracing::info!(duration_ms, "step passed");
                }
                Err(e) => {
                    record.status = StepStatus::Failed;
                    record.error = Some(e.to_string());
                    tracing::warn!(duration_ms, error = %e, "step failed");
                }
            }
        }
        drop(inner);

        result
    }

    /// Snapshot of all records, in start order
    #[must_use]
    pub fn records(&self) -> Vec<StepRecord> {
        self.inner.borrow().records.clone()
    }

    /// Number of recorded steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().records.len()
    }

    /// Whether no step has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().records.is_empty()
    }

    /// Number of passed steps
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(StepStatus::Passed)
    }

    /// Number of failed steps
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.inner
            .borrow()
            .records
            .iter()
            .filter(|r| r.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ProbeError;

    #[test]
    fn test_passing_step_is_recorded() {
        let log = StepLog::new();
        let value = log.run("Click back button", || Ok(7)).unwrap();

        assert_eq!(value, 7);
        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Click back button");
        assert_eq!(records[0].status, StepStatus::Passed);
        assert_eq!(records[0].depth, 0);
        assert!(records[0].error.is_none());
    }

    #[test]
    fn test_failing_step_keeps_error() {
        let log = StepLog::new();
        let err = log
            .run("OK button existence check", || -> ProbeResult<()> {
                Err(ProbeError::driver("socket closed"))
            })
            .unwrap_err();

        assert!(matches!(err, ProbeError::Driver { .. }));
        assert_eq!(log.failed(), 1);
        assert_eq!(
            log.records()[0].error.as_deref(),
            Some("Driver error: socket closed")
        );
    }

    #[test]
    fn test_nested_steps_record_depth_in_start_order() {
        let log = StepLog::new();
        log.run("outer", || {
            log.run("inner 1", || Ok(()))?;
            log.run("inner 2", || Ok(()))
        })
        .unwrap();

        let records = log.records();
        let names: Vec<(&str, usize)> = records
            .iter()
            .map(|r| (r.name.as_str(), r.depth))
            .collect();
        assert_eq!(names, vec![("outer", 0), ("inner 1", 1), ("inner 2", 1)]);
        assert_eq!(log.passed(), 3);
    }

    #[test]
    fn test_clones_share_records() {
        let log = StepLog::new();
        let clone = log.clone();
        clone.run("from clone", || Ok(())).unwrap();
        assert_eq!(log.len(), 1);
        assert!(!log.is_empty());
    }

    #[test]
    fn test_record_serialization_skips_missing_error() {
        let log = StepLog::new();
        log.run("a", || Ok(())).unwrap();
        let json = serde_json::to_value(&log.records()[0]).unwrap();
        assert_eq!(json["status"], "passed");
        assert!(json.get("error").is_none());
    }
}
