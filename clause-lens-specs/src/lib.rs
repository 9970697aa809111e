//! Fixture-driven testing infrastructure for clause-lens.
//!
//! Test cases are `.lens` files: a clause body with the expected typed
//! segments marked inline, plus directives for the term catalog and the
//! annotation.
//!
//! ```text
//! # Annotation region hides terms
//! > term dgcl: DGCL
//! > annotation: in accordance with the DGCL
//! The Merger shall be effected «@:in accordance with the DGCL», and the «dgcl:DGCL» shall govern.
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Parses `.lens` fixture files with inline span markers
//! - [`fixture`] - Parsed fixture types
//! - [`loader`] - Fixture file loading
//! - [`runner`] - Runs fixtures through the engine and diffs the spans
//! - [`errors`] - Error types
//! - [`formatter`] - Failure and summary formatting
//! - [`failures`] - Expected failures tracking via TOML

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod parser;
pub mod runner;

pub use config::RunnerConfig;
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{LensFixture, SpanMarker, TermDirective, ANNOTATION_MARKER};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use parser::{parse_fixture, parse_spans};
pub use runner::{check_fixture, run_fixture, run_harness, FixtureResult, SpanMismatch};
