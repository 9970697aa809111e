//! Expected failures tracking via TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{SpecError, SpecResult};

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Mismatch reference, e.g. `co@4..11` or `lossless`.
    pub span: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Failures {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SpecError::Failures {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn is_expected(&self, fixture: &str, span_ref: &str) -> FailureState {
        if self.known.iter().any(|e| e.matches(fixture, span_ref)) {
            return FailureState::Known;
        }
        if self.pending.iter().any(|e| e.matches(fixture, span_ref)) {
            return FailureState::Pending;
        }
        FailureState::Regression
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn get_entry(&self, fixture: &str, span_ref: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.matches(fixture, span_ref))
    }
}

impl FailureEntry {
    fn matches(&self, fixture: &str, span_ref: &str) -> bool {
        self.fixture == fixture && self.span == span_ref
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default)]
pub struct HarnessResult {
    /// Total checks made.
    pub total: usize,
    pub passed: usize,
    /// Expected failures (known + pending).
    pub expected_failures: usize,
    /// Regressions (unexpected failures).
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the exit code (0 = pass, 1 = regressions).
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    /// No regressions.
    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }

    pub fn merge(&mut self, other: &HarnessResult) {
        self.total += other.total;
        self.passed += other.passed;
        self.expected_failures += other.expected_failures;
        self.regressions += other.regressions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(fixture: &str, span: &str) -> FailureEntry {
        FailureEntry {
            fixture: fixture.to_string(),
            span: span.to_string(),
            reason: None,
            added: None,
            issue: None,
        }
    }

    #[test]
    fn test_unlisted_failure_is_regression() {
        let failures = ExpectedFailures::default();
        assert_eq!(failures.count(), 0);
        assert_eq!(
            failures.is_expected("single-term.lens", "dgcl@36..40"),
            FailureState::Regression
        );
    }

    #[test]
    fn test_known_and_pending() {
        let failures = ExpectedFailures {
            known: vec![entry("a.lens", "co@4..11")],
            pending: vec![entry("b.lens", "lossless")],
        };

        assert_eq!(failures.is_expected("a.lens", "co@4..11"), FailureState::Known);
        assert_eq!(failures.is_expected("b.lens", "lossless"), FailureState::Pending);
        assert_eq!(
            failures.is_expected("a.lens", "lossless"),
            FailureState::Regression
        );
        assert!(failures.get_entry("b.lens", "lossless").is_some());
        assert!(failures.get_entry("b.lens", "co@4..11").is_none());
    }

    #[test]
    fn test_harness_result_record() {
        let mut result = HarnessResult::new();
        assert_eq!(result.exit_code(), 0);

        result.record_pass();
        result.record_failure(FailureState::Pending);
        assert!(result.success());

        result.record_failure(FailureState::Regression);
        assert_eq!(result.total, 3);
        assert_eq!(result.passed, 1);
        assert_eq!(result.expected_failures, 1);
        assert_eq!(result.regressions, 1);
        assert_eq!(result.exit_code(), 1);

        let mut total = HarnessResult::new();
        total.merge(&result);
        total.merge(&result);
        assert_eq!(total.total, 6);
        assert_eq!(total.regressions, 2);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[pending]]
fixture = "annotation/open.lens"
span = "open-state"
reason = "Awaiting toggle fix"
added = "2026-10-01"

[[known]]
fixture = "known/case-sensitive.lens"
span = "co@4..11"
issue = "https://example.com/issues/7"
"#
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.count(), 2);
        assert_eq!(
            failures.is_expected("annotation/open.lens", "open-state"),
            FailureState::Pending
        );
        assert_eq!(
            failures
                .get_entry("known/case-sensitive.lens", "co@4..11")
                .and_then(|e| e.issue.as_deref()),
            Some("https://example.com/issues/7")
        );
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let failures = ExpectedFailures::load(Path::new("/nonexistent/failures.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_load_malformed_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[known]]\nfixture = ").unwrap();

        let err = ExpectedFailures::load(file.path()).unwrap_err();
        assert!(matches!(err, SpecError::Failures { .. }));
        assert!(err.to_string().contains("failed to load expected failures"));
    }
}
