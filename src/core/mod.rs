//! Core hierarchical state machine types and logic.
//!
//! This module contains the transition engine:
//! - State identifiers and per-state behavior via [`StateId`] and [`Behavior`]
//! - The static state tree and forward-topology extraction via [`Topology`]
//! - The bounded active-state stack and transitions via [`Machine`]
//! - Deferred transition requests via [`TransitionQueue`]
//!
//! Everything here is synchronous and allocation-free once a topology is
//! defined; a machine is a fixed block of slots the caller owns.

mod machine;
mod queue;
mod state;
mod topology;

pub use machine::{ActivePath, Machine, TransitionError, DEFAULT_MAX_DEPTH};
pub use queue::TransitionQueue;
pub use state::{Behavior, Passive, StateId};
pub use topology::Topology;
