//! Runs fixtures through the segmentation engine and diffs the result
//! against their span markers.

use clause_lens::{concat_segments, segment_clause, segment_ranges, Segment};

use crate::config::RunnerConfig;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::{LensFixture, SpanMarker, ANNOTATION_MARKER};
use crate::formatter::{format_failure, format_summary};

/// Reference used for a failed lossless check.
pub const LOSSLESS_REF: &str = "lossless";
/// Reference used for a failed open-state check.
pub const OPEN_STATE_REF: &str = "open-state";

/// One difference between the fixture and the engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanMismatch {
    /// Marked in the fixture, not produced by the engine.
    Missing(SpanMarker),
    /// Produced by the engine, not marked in the fixture.
    Unexpected(SpanMarker),
    /// Concatenated segments differ from the fixture text.
    NotLossless { actual: String },
    /// An annotation region's open flag differs from `> open`.
    OpenState { expected: bool, actual: bool },
}

impl SpanMismatch {
    /// Stable reference for the expected-failures ledger.
    pub fn reference(&self) -> String {
        match self {
            SpanMismatch::Missing(span) | SpanMismatch::Unexpected(span) => span.reference(),
            SpanMismatch::NotLossless { .. } => LOSSLESS_REF.to_string(),
            SpanMismatch::OpenState { .. } => OPEN_STATE_REF.to_string(),
        }
    }
}

/// Result of running one fixture.
#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    /// Typed segments the engine produced, as markers.
    pub actual: Vec<SpanMarker>,
    /// Expected spans found in the output.
    pub matched: Vec<SpanMarker>,
    pub mismatches: Vec<SpanMismatch>,
}

impl FixtureResult {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Segment the fixture text and diff the typed segments against its markers.
pub fn run_fixture(fixture: &LensFixture, config: &RunnerConfig) -> FixtureResult {
    let catalog = fixture.catalog();
    let annotation = fixture.annotation_spec();
    let segments = segment_clause(&fixture.text, annotation.as_ref(), fixture.is_open, &catalog);

    let actual: Vec<SpanMarker> = segments
        .iter()
        .zip(segment_ranges(&segments))
        .filter_map(|(segment, range)| {
            let id = match segment {
                Segment::PlainText { .. } => return None,
                Segment::TermRef { term_id, .. } => *term_id,
                Segment::AnnotationRegion { .. } => ANNOTATION_MARKER,
            };
            Some(SpanMarker {
                id: id.to_string(),
                text: segment.text().to_string(),
                byte_range: range,
            })
        })
        .collect();

    let mut result = FixtureResult::default();

    for expected in &fixture.spans {
        if actual.contains(expected) {
            result.matched.push(expected.clone());
        } else {
            result.mismatches.push(SpanMismatch::Missing(expected.clone()));
        }
    }
    for span in &actual {
        if !fixture.spans.contains(span) {
            result.mismatches.push(SpanMismatch::Unexpected(span.clone()));
        }
    }

    if config.require_lossless {
        let rebuilt = concat_segments(&segments);
        if rebuilt != fixture.text {
            result.mismatches.push(SpanMismatch::NotLossless { actual: rebuilt });
        }
    }

    if config.check_open_state {
        let wrong = segments.iter().find_map(|segment| match segment {
            Segment::AnnotationRegion { is_open, .. } if *is_open != fixture.is_open => {
                Some(*is_open)
            }
            _ => None,
        });
        if let Some(actual_open) = wrong {
            result.mismatches.push(SpanMismatch::OpenState {
                expected: fixture.is_open,
                actual: actual_open,
            });
        }
    }

    result.actual = actual;
    result
}

/// Tally one fixture's result against the expected-failures ledger.
pub fn check_fixture(
    name: &str,
    fixture: &LensFixture,
    result: &FixtureResult,
    failures: &ExpectedFailures,
) -> (HarnessResult, Vec<String>) {
    let mut tally = HarnessResult::new();
    let mut reports = Vec::new();

    for _ in &result.matched {
        tally.record_pass();
    }
    for mismatch in &result.mismatches {
        let state = failures.is_expected(name, &mismatch.reference());
        tally.record_failure(state);
        if state == FailureState::Regression {
            reports.push(format_failure(name, fixture, mismatch));
        }
    }

    (tally, reports)
}

/// Run every fixture, printing per-fixture lines and a summary to stderr.
pub fn run_harness(
    fixtures: &[(String, LensFixture)],
    config: &RunnerConfig,
    failures: &ExpectedFailures,
) -> HarnessResult {
    let mut total = HarnessResult::new();

    eprintln!("\n=== FIXTURE RESULTS ===\n");

    for (name, fixture) in fixtures {
        let result = run_fixture(fixture, config);
        let (tally, reports) = check_fixture(name, fixture, &result, failures);

        let status = if tally.success() { "PASS" } else { "FAIL" };
        eprintln!(
            "[{}] {} - {}/{} spans matched",
            status,
            name,
            result.matched.len(),
            fixture.spans.len()
        );
        for report in &reports {
            eprintln!("{}", report);
        }

        total.merge(&tally);
    }

    eprintln!("\n=== SUMMARY ===");
    eprint!(
        "{}",
        format_summary(
            &format!("{} fixtures", fixtures.len()),
            total.passed,
            total.total - total.passed,
            total.expected_failures,
            total.regressions,
        )
    );

    total
}
