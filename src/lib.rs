//! Nestate: bounded-depth hierarchical state machines
//!
//! Nestate models nested ("hierarchical") states: the machine is active in a
//! whole path of states at once, from an outermost root down to the
//! innermost leaf. Transitions diff the current path against the target's
//! ancestor chain and exit/enter only the part that differs, so shared
//! ancestors keep running across a transition.
//!
//! The active path lives in a fixed number of inline slots chosen at compile
//! time, and the transition engine never allocates; the crate is built for
//! environments where dynamic allocation is unavailable or unwelcome.
//!
//! # Core Concepts
//!
//! - **Topology**: the static tree of states, built once via [`Topology`]
//!   and shared by any number of machines
//! - **Machine**: the bounded stack of currently active states, moved with
//!   [`Machine::goto`] (hooks fire) or [`Machine::jump`] (silent reset)
//! - **Behavior**: per-state enter/exit hooks via the [`Behavior`] trait
//!
//! # Example
//!
//! ```rust
//! use nestate::{Machine, Topology};
//!
//! let mut topology: Topology = Topology::new();
//! nestate::state_tree! {
//!     in topology;
//!     stopped,
//!     running {
//!         idle,
//!         working,
//!     },
//! }
//!
//! let mut machine: Machine = Machine::new();
//! machine.goto(&topology, &mut (), Some(working)).unwrap();
//! assert_eq!(machine.top(), Some(working));
//! assert!(machine.contains(running));
//!
//! // Sibling transition: `running` is the least common ancestor and stays.
//! machine.goto(&topology, &mut (), Some(idle)).unwrap();
//! assert!(machine.contains(running));
//! assert!(!machine.contains(working));
//!
//! machine.goto(&topology, &mut (), Some(stopped)).unwrap();
//! assert!(!machine.contains(running));
//! ```

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, StateBuilder};
pub use core::{
    ActivePath, Behavior, Machine, Passive, StateId, Topology, TransitionError, TransitionQueue,
    DEFAULT_MAX_DEPTH,
};
