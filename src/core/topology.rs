//! The static state tree and forward-topology extraction.
//!
//! A [`Topology`] is an arena of state descriptors. Each state's only
//! topological attribute is its optional parent, so the arena forms a tree
//! (or forest) that is fixed once machines start driving it. Parents are
//! stored as [`StateId`] indices and resolved through the arena at traversal
//! time, never as raw references.

use super::state::{Behavior, StateId};

struct Node<C> {
    name: String,
    parent: Option<StateId>,
    behavior: Box<dyn Behavior<C> + Send + Sync>,
}

/// Arena of state descriptors forming the static state tree.
///
/// States are registered through [`Topology::state`] while the topology is
/// being defined; afterwards the arena is only read. The transition engine
/// itself never allocates; the arena grows only during registration.
///
/// A topology is shared, not owned, by machines: any number of
/// [`Machine`](super::Machine) instances may drive the same topology, and
/// because behaviors are `Send + Sync` the topology may be shared across
/// threads while each machine stays confined to one.
pub struct Topology<C = ()> {
    nodes: Vec<Node<C>>,
}

impl<C> Topology<C> {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn insert(
        &mut self,
        name: String,
        parent: Option<StateId>,
        behavior: Box<dyn Behavior<C> + Send + Sync>,
    ) -> StateId {
        let id = StateId(self.nodes.len());
        self.nodes.push(Node {
            name,
            parent,
            behavior,
        });
        id
    }

    /// The parent of `state`, or `None` for roots and unknown ids.
    pub fn parent(&self, state: StateId) -> Option<StateId> {
        self.nodes.get(state.index()).and_then(|node| node.parent)
    }

    /// The name `state` was registered under.
    pub fn name(&self, state: StateId) -> Option<&str> {
        self.nodes.get(state.index()).map(|node| node.name.as_str())
    }

    /// Whether `state` was issued by this topology.
    pub fn contains(&self, state: StateId) -> bool {
        state.index() < self.nodes.len()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no states have been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn behavior(&self, state: StateId) -> Option<&(dyn Behavior<C> + Send + Sync)> {
        self.nodes.get(state.index()).map(|node| &*node.behavior)
    }

    /// Write the forward topology of `state` into `out`, root first.
    ///
    /// The forward topology is the ordered ancestor chain from the outermost
    /// root down to `state` itself. The buffer length bounds the walk: a
    /// chain longer than `out.len()` is truncated to its outermost
    /// `out.len()` states, so the written prefix is always itself a valid
    /// root-to-leaf path. Returns the number of slots written; an absent
    /// `state` or an empty buffer writes nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestate::Topology;
    ///
    /// let mut topology: Topology = Topology::new();
    /// let a = topology.state("a").register().unwrap();
    /// let b = topology.state("b").parent(a).register().unwrap();
    /// let c = topology.state("c").parent(b).register().unwrap();
    ///
    /// let mut chain = [None; 4];
    /// assert_eq!(topology.forward_of(Some(c), &mut chain), 3);
    /// assert_eq!(chain, [Some(a), Some(b), Some(c), None]);
    ///
    /// let mut short = [None; 2];
    /// assert_eq!(topology.forward_of(Some(c), &mut short), 2);
    /// assert_eq!(short, [Some(a), Some(b)]);
    /// ```
    pub fn forward_of(&self, state: Option<StateId>, out: &mut [Option<StateId>]) -> usize {
        let length = self.chain_length(state);
        let skip = length.saturating_sub(out.len());
        let written = length - skip;

        // Drop the innermost `skip` states, keep the outermost `written`.
        let mut cursor = state;
        for _ in 0..skip {
            cursor = cursor.and_then(|id| self.parent(id));
        }
        let mut slot = written;
        while let Some(id) = cursor {
            if slot == 0 {
                break;
            }
            slot -= 1;
            out[slot] = Some(id);
            cursor = self.parent(id);
        }
        written
    }

    /// Length of the parent chain from the root down to `state`.
    ///
    /// Bounded by the arena size: a walk that takes more steps than there
    /// are states must be revisiting one, which only a malformed parent
    /// relation can produce. The walk stops there rather than looping.
    fn chain_length(&self, state: Option<StateId>) -> usize {
        let bound = self.nodes.len();
        let mut length = 0;
        let mut cursor = state;
        while let Some(id) = cursor {
            if length == bound {
                debug_assert!(false, "parent chain revisits a state: {:?}", id);
                break;
            }
            length += 1;
            cursor = self.parent(id);
        }
        length
    }
}

impl<C> Default for Topology<C> {
    fn default() -> Self {
        Self::new()
    }
}
