//! Run lifecycle.
//!
//! ```text
//! Idle ──start──► Running ──complete──► Completed
//!                    │
//!                    └────fail────► Failed
//! ```

/// State of a single pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunState {
    pub fn start(&mut self) {
        debug_assert_eq!(*self, Self::Idle, "run started twice");
        *self = Self::Running;
    }

    pub fn complete(&mut self) {
        debug_assert_eq!(*self, Self::Running, "completing a run that is not running");
        *self = Self::Completed;
    }

    pub fn fail(&mut self) {
        debug_assert!(!self.is_terminal(), "failing a finished run");
        *self = Self::Failed;
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let mut state = RunState::default();
        state.start();
        assert_eq!(state, RunState::Running);
        state.complete();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_failure_path() {
        let mut state = RunState::default();
        state.start();
        state.fail();
        assert_eq!(state, RunState::Failed);
    }

    #[test]
    #[should_panic(expected = "run started twice")]
    #[cfg(debug_assertions)]
    fn test_double_start_panics_in_debug() {
        let mut state = RunState::default();
        state.start();
        state.start();
    }
}
