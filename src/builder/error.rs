//! Build errors for topology registration.

use thiserror::Error;

use crate::core::StateId;

/// Errors that can occur while registering states in a topology.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("parent state {0:?} is not registered in this topology. Register parents before their children")]
    UnknownParent(StateId),
}
