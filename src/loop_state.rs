//! Shared frame loop state
//!
//! Used by both the browser and native frame loops.

/// Frame loop lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running)
    }
}
