//! Single-slot open/closed state for annotation regions.
//!
//! The surrounding UI owns this value and passes `is_open(&key)` into the
//! overlay as a plain boolean. Only one annotation can be open per tab:
//! opening another one closes the current one without passing through
//! [`ToggleState::Closed`].

use serde::Serialize;

/// Either nothing is open, or exactly one key is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "key", rename_all = "snake_case")]
pub enum ToggleState<K> {
    Closed,
    Open(K),
}

impl<K> Default for ToggleState<K> {
    fn default() -> Self {
        ToggleState::Closed
    }
}

/// Serializes as its [`ToggleState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationToggle<K> {
    state: ToggleState<K>,
}

impl<K> Default for AnnotationToggle<K> {
    fn default() -> Self {
        Self {
            state: ToggleState::Closed,
        }
    }
}

impl<K: PartialEq> AnnotationToggle<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on the annotation identified by `key`.
    pub fn toggle(&mut self, key: K) {
        self.state = match std::mem::take(&mut self.state) {
            ToggleState::Open(current) if current == key => ToggleState::Closed,
            _ => ToggleState::Open(key),
        };
    }

    pub fn is_open(&self, key: &K) -> bool {
        matches!(&self.state, ToggleState::Open(current) if current == key)
    }

    pub fn open_key(&self) -> Option<&K> {
        match &self.state {
            ToggleState::Open(key) => Some(key),
            ToggleState::Closed => None,
        }
    }

    pub fn close(&mut self) {
        self.state = ToggleState::Closed;
    }

    pub fn state(&self) -> &ToggleState<K> {
        &self.state
    }
}
