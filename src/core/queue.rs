//! Deferred transition requests.
//!
//! [`Machine::goto`](super::Machine::goto) is not reentrant: hooks receive
//! the caller's context, never the machine, so a hook cannot start another
//! transition directly. The sanctioned pattern is message passing: a hook
//! records the transition it wants in a [`TransitionQueue`] kept in the
//! context, and the caller drains the queue after the outer `goto` returns.
//! Each drained transition completes fully before the next begins.

use std::collections::VecDeque;

use super::state::StateId;

/// FIFO of transition requests recorded by hooks for the caller to drain.
///
/// # Example
///
/// ```rust
/// use nestate::{Machine, Topology, TransitionQueue};
///
/// struct Ctx {
///     queue: TransitionQueue,
/// }
///
/// let mut topology = Topology::new();
/// let failed = topology
///     .state("failed")
///     .on_enter(|_id, _path, ctx: &mut Ctx| ctx.queue.request_exit())
///     .register()
///     .unwrap();
///
/// let mut machine: Machine = Machine::new();
/// let mut ctx = Ctx {
///     queue: TransitionQueue::new(),
/// };
/// machine.goto(&topology, &mut ctx, Some(failed)).unwrap();
///
/// // Entering `failed` requested a follow-up; drain it.
/// while let Some(target) = ctx.queue.next_request() {
///     machine.goto(&topology, &mut ctx, target).unwrap();
/// }
/// assert!(machine.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct TransitionQueue {
    requests: VecDeque<Option<StateId>>,
}

impl TransitionQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a transition to `target`.
    pub fn request(&mut self, target: StateId) {
        self.requests.push_back(Some(target));
    }

    /// Request that every active state be exited.
    pub fn request_exit(&mut self) {
        self.requests.push_back(None);
    }

    /// Take the oldest pending request, if any. The inner value is the
    /// `goto` target: `None` means exit everything.
    pub fn next_request(&mut self) -> Option<Option<StateId>> {
        self.requests.pop_front()
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no request is pending.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
