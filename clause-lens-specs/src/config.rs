//! Runner configuration.

/// Which whole-fixture checks the runner makes besides the span diff.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Concatenated segments must reproduce the fixture text.
    pub require_lossless: bool,
    /// Every annotation region must carry the fixture's `> open` state.
    pub check_open_state: bool,
}

impl RunnerConfig {
    /// Span diff only.
    pub fn spans_only() -> Self {
        Self {
            require_lossless: false,
            check_open_state: false,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            require_lossless: true,
            check_open_state: true,
        }
    }
}
