//! The bounded active-state stack and the transition algorithm.
//!
//! A [`Machine`] holds the path of currently active states, outermost first,
//! in a fixed number of inline slots. Transitions diff the current path
//! against the target's forward topology and touch only the differing
//! suffix: shared ancestors are neither exited nor re-entered.
//!
//! Invariants, holding at rest between transitions:
//! - slots `0..depth` hold the forward topology of the top state, slots
//!   `depth..` are cleared;
//! - `depth <= MAX_DEPTH`.
//!
//! Hooks run after the structural mutation, so they observe the new path.
//! A machine is not safe to share between threads of control; independent
//! machines over the same topology are.

use thiserror::Error;

use super::state::StateId;
use super::topology::Topology;

/// Default number of active-state slots.
///
/// Seven levels of nesting is plenty; a design that needs more usually
/// wants a flatter topology instead of a larger bound.
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// Errors produced by the transition operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The target's forward topology does not fit in the machine's slots.
    /// The machine is left on a valid path; see [`Machine::goto`].
    #[error("active-state stack capacity of {capacity} exceeded")]
    CapacityExceeded {
        /// The machine's `MAX_DEPTH`.
        capacity: usize,
    },

    /// The id was never issued by the topology driving this machine.
    /// Nothing was mutated.
    #[error("state {0:?} is not registered in this topology")]
    UnknownState(StateId),
}

/// Read-only view of a machine's active path, outermost state first.
///
/// This is what hooks see: the path as already mutated by the transition in
/// progress. Obtainable at rest through [`Machine::path`].
pub struct ActivePath<'a> {
    slots: &'a [Option<StateId>],
}

impl ActivePath<'_> {
    /// Number of active states.
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Whether no state is active.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The innermost active state.
    pub fn top(&self) -> Option<StateId> {
        self.slots.last().copied().flatten()
    }

    /// Whether `state` is anywhere on the path.
    pub fn contains(&self, state: StateId) -> bool {
        self.slots.iter().any(|slot| *slot == Some(state))
    }

    /// The active states, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.slots.iter().copied().flatten()
    }
}

/// A hierarchical state machine with a compile-time depth bound.
///
/// The machine stores [`StateId`]s, never state data: states belong to the
/// [`Topology`] and outlive every machine driving it. A machine starts
/// empty (no active state) and moves exclusively through [`Machine::goto`]
/// and [`Machine::jump`].
///
/// # Example
///
/// ```rust
/// use nestate::{Machine, Topology};
///
/// let mut topology: Topology = Topology::new();
/// let opened = topology.state("opened").register().unwrap();
/// let closed = topology.state("closed").register().unwrap();
/// let locked = topology.state("locked").parent(closed).register().unwrap();
///
/// let mut machine: Machine = Machine::new();
/// machine.goto(&topology, &mut (), Some(locked)).unwrap();
/// assert_eq!(machine.top(), Some(locked));
/// assert!(machine.contains(closed));
///
/// machine.goto(&topology, &mut (), Some(opened)).unwrap();
/// assert!(!machine.contains(closed));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine<const MAX_DEPTH: usize = DEFAULT_MAX_DEPTH> {
    slots: [Option<StateId>; MAX_DEPTH],
    depth: usize,
}

impl<const MAX_DEPTH: usize> Machine<MAX_DEPTH> {
    /// Create a machine with no active state.
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_DEPTH],
            depth: 0,
        }
    }

    /// Return the machine to its initial condition: depth zero, every slot
    /// cleared. No hooks run.
    pub fn reset(&mut self) {
        self.slots = [None; MAX_DEPTH];
        self.depth = 0;
    }

    /// Number of currently active states.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether no state is active.
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// The innermost active state, or `None` if the machine is empty.
    pub fn top(&self) -> Option<StateId> {
        if self.depth == 0 {
            None
        } else {
            self.slots[self.depth - 1]
        }
    }

    /// Whether `state` is active, at any depth.
    pub fn contains(&self, state: StateId) -> bool {
        self.path().contains(state)
    }

    /// The active path, outermost state first.
    pub fn path(&self) -> ActivePath<'_> {
        ActivePath {
            slots: &self.slots[..self.depth],
        }
    }

    /// Transition to `target`, running exit and enter hooks for the
    /// differing suffix only.
    ///
    /// The current path and the target's forward topology share a common
    /// prefix ending at their least common ancestor. States above it are
    /// untouched; the machine exits the divergent states innermost-first,
    /// then enters the target's remaining states outermost-first. Each
    /// hook fires right after its state is popped or pushed. A `target` of
    /// `None` exits every active state. Transitioning to the state already
    /// on top is a no-op and runs no hooks.
    ///
    /// # Errors
    ///
    /// [`TransitionError::UnknownState`] if `target` was not issued by
    /// `topology`; the machine is untouched.
    ///
    /// [`TransitionError::CapacityExceeded`] if the target's topology is
    /// deeper than `MAX_DEPTH`. The transition is applied partially, not
    /// rolled back: the exit phase and the outermost `MAX_DEPTH` states of
    /// the target topology have been applied, so the machine rests on a
    /// valid path that falls short of `target`. Callers must not assume the
    /// target was reached when this error is returned.
    pub fn goto<C>(
        &mut self,
        topology: &Topology<C>,
        ctx: &mut C,
        target: Option<StateId>,
    ) -> Result<(), TransitionError> {
        if target == self.top() {
            return Ok(());
        }
        let mut landing = Self::new();
        landing.jump(topology, target)?;

        // Depth of the least common ancestor; everything before it is
        // shared between the two paths and stays put.
        let mut shared = 0;
        while shared < self.depth
            && shared < landing.depth
            && self.slots[shared] == landing.slots[shared]
        {
            shared += 1;
        }
        while self.depth > shared {
            self.exit_top(topology, ctx);
        }
        while self.depth < landing.depth {
            match landing.slots[self.depth] {
                Some(next) => self.enter(topology, ctx, next)?,
                None => break,
            }
        }
        // A topology deeper than MAX_DEPTH lands on its outermost states
        // and never reaches the target itself.
        if self.top() != target {
            return Err(TransitionError::CapacityExceeded {
                capacity: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Reset and rebuild the path as `target`'s forward topology, without
    /// running any hook and without diffing against the current path.
    ///
    /// This is the side-effect-free way to force a known state, typically
    /// at startup. A topology deeper than `MAX_DEPTH` is truncated to its
    /// outermost `MAX_DEPTH` states, silently: size the machine to the
    /// deepest state it must reach.
    ///
    /// # Errors
    ///
    /// [`TransitionError::UnknownState`] if `target` was not issued by
    /// `topology`; the machine is untouched.
    pub fn jump<C>(
        &mut self,
        topology: &Topology<C>,
        target: Option<StateId>,
    ) -> Result<(), TransitionError> {
        if let Some(id) = target {
            if !topology.contains(id) {
                return Err(TransitionError::UnknownState(id));
            }
        }
        self.reset();
        self.depth = topology.forward_of(target, &mut self.slots);
        Ok(())
    }

    /// Pop the top state and run its exit hook.
    fn exit_top<C>(&mut self, topology: &Topology<C>, ctx: &mut C) {
        let Some(state) = self.pop() else { return };
        if let Some(behavior) = topology.behavior(state) {
            let path = ActivePath {
                slots: &self.slots[..self.depth],
            };
            behavior.on_exit(state, &path, ctx);
        }
    }

    /// Push `state` and run its enter hook.
    fn enter<C>(
        &mut self,
        topology: &Topology<C>,
        ctx: &mut C,
        state: StateId,
    ) -> Result<(), TransitionError> {
        self.push(state)?;
        if let Some(behavior) = topology.behavior(state) {
            let path = ActivePath {
                slots: &self.slots[..self.depth],
            };
            behavior.on_enter(state, &path, ctx);
        }
        Ok(())
    }

    fn push(&mut self, state: StateId) -> Result<(), TransitionError> {
        if self.depth == MAX_DEPTH {
            return Err(TransitionError::CapacityExceeded {
                capacity: MAX_DEPTH,
            });
        }
        self.slots[self.depth] = Some(state);
        self.depth += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<StateId> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        // Clearing keeps stale ids from lingering beyond the depth.
        self.slots[self.depth].take()
    }
}

impl<const MAX_DEPTH: usize> Default for Machine<MAX_DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}
