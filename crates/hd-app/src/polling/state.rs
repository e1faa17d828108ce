//! Re-entrancy guard for poll cycles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Running,
}

/// `Idle` / `Running` state shared by the timer firings of one view.
///
/// A firing that finds the state `Running` is dropped, not queued.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    running: Arc<AtomicBool>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `Idle -> Running`. Returns `None` if a cycle is already running.
    pub fn try_begin(&self) -> Option<CycleGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard {
                running: self.running.clone(),
            })
    }

    pub fn phase(&self) -> PollPhase {
        if self.running.load(Ordering::Acquire) {
            PollPhase::Running
        } else {
            PollPhase::Idle
        }
    }
}

/// Held for the duration of one cycle. Dropping it moves the state back to
/// `Idle`, including on early return, error, panic or task cancellation.
#[derive(Debug)]
pub struct CycleGuard {
    running: Arc<AtomicBool>,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_fails_while_guard_is_held() {
        let state = PollState::new();
        let guard = state.try_begin().expect("first begin");
        assert_eq!(state.phase(), PollPhase::Running);
        assert!(state.try_begin().is_none());

        drop(guard);
        assert_eq!(state.phase(), PollPhase::Idle);
        assert!(state.try_begin().is_some());
    }

    #[test]
    fn guard_is_released_on_panic() {
        let state = PollState::new();
        let cloned = state.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = cloned.try_begin().expect("begin");
            panic!("cycle blew up");
        });
        assert!(result.is_err());
        assert_eq!(state.phase(), PollPhase::Idle);
    }
}
