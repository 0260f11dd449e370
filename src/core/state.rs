//! State identifiers and the per-state behavior interface.
//!
//! States live in a [`Topology`](super::Topology) arena and are referred to
//! by [`StateId`]. The hooks a state may carry are expressed through the
//! [`Behavior`] trait rather than optional function pointers, so the
//! transition engine never has to test for a missing callback.

use super::machine::ActivePath;

/// Identifier of a state registered in a [`Topology`](super::Topology).
///
/// A `StateId` is a stable arena index. It is issued by the topology that
/// registered the state and is only meaningful to that topology; handing a
/// `StateId` to a machine driving a different topology is rejected as
/// [`TransitionError::UnknownState`](super::TransitionError::UnknownState).
///
/// Ids are small `Copy` values, so the active-state stack holds plain ids
/// instead of references and never borrows from the topology.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Enter/exit hooks for a state.
///
/// Both hooks default to no-ops, so a behavior only implements what it
/// needs. Hooks fire *after* the structural mutation: when `on_enter` runs
/// the state is already on the stack, and when `on_exit` runs it is already
/// off. The `path` argument is the machine's active path at that moment.
///
/// Hooks receive the caller's context `C` mutably but never the machine
/// itself, so a hook cannot transition the machine it is running on. A hook
/// that wants a follow-up transition records the request in its context;
/// see [`TransitionQueue`](super::TransitionQueue).
///
/// # Example
///
/// ```rust
/// use nestate::{ActivePath, Behavior, Machine, StateId, Topology};
///
/// struct Counters {
///     entered: usize,
/// }
///
/// struct Counting;
///
/// impl Behavior<Counters> for Counting {
///     fn on_enter(&self, _state: StateId, _path: &ActivePath<'_>, ctx: &mut Counters) {
///         ctx.entered += 1;
///     }
/// }
///
/// let mut topology = Topology::new();
/// let root = topology.state("root").behavior(Counting).register().unwrap();
///
/// let mut machine: Machine = Machine::new();
/// let mut counters = Counters { entered: 0 };
/// machine.goto(&topology, &mut counters, Some(root)).unwrap();
/// assert_eq!(counters.entered, 1);
/// ```
pub trait Behavior<C> {
    /// Called immediately after the state is pushed onto the active path.
    fn on_enter(&self, state: StateId, path: &ActivePath<'_>, ctx: &mut C) {
        let _ = (state, path, ctx);
    }

    /// Called immediately after the state is popped off the active path.
    fn on_exit(&self, state: StateId, path: &ActivePath<'_>, ctx: &mut C) {
        let _ = (state, path, ctx);
    }
}

/// A behavior with no hooks. The default for states registered without one.
pub struct Passive;

impl<C> Behavior<C> for Passive {}
