//! Builder API for ergonomic topology construction.
//!
//! States are registered through a fluent builder started with
//! [`Topology::state`]: name the state, optionally point it at its parent,
//! attach hooks or a full [`Behavior`], then [`register`](StateBuilder::register)
//! it to obtain its [`StateId`]. Parents must be registered before their
//! children, which is also what makes cycles unrepresentable.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::core::{ActivePath, Behavior, Passive, StateId, Topology};

/// Type alias for boxed hook closures.
pub type HookFn<C> = Box<dyn Fn(StateId, &ActivePath<'_>, &mut C) + Send + Sync>;

/// Behavior assembled from optional closure hooks.
struct Hooks<C> {
    enter: Option<HookFn<C>>,
    exit: Option<HookFn<C>>,
}

impl<C> Behavior<C> for Hooks<C> {
    fn on_enter(&self, state: StateId, path: &ActivePath<'_>, ctx: &mut C) {
        if let Some(hook) = &self.enter {
            hook(state, path, ctx);
        }
    }

    fn on_exit(&self, state: StateId, path: &ActivePath<'_>, ctx: &mut C) {
        if let Some(hook) = &self.exit {
            hook(state, path, ctx);
        }
    }
}

impl<C> Topology<C> {
    /// Begin registering a state named `name`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nestate::{Machine, Topology};
    ///
    /// struct Session {
    ///     handshakes: usize,
    /// }
    ///
    /// let mut topology = Topology::new();
    /// let online = topology.state("online").register().unwrap();
    /// let handshaking = topology
    ///     .state("handshaking")
    ///     .parent(online)
    ///     .on_enter(|_id, _path, session: &mut Session| session.handshakes += 1)
    ///     .register()
    ///     .unwrap();
    ///
    /// let mut machine: Machine = Machine::new();
    /// let mut session = Session { handshakes: 0 };
    /// machine.goto(&topology, &mut session, Some(handshaking)).unwrap();
    /// assert_eq!(session.handshakes, 1);
    /// assert!(machine.contains(online));
    /// ```
    pub fn state(&mut self, name: impl Into<String>) -> StateBuilder<'_, C> {
        StateBuilder {
            topology: self,
            name: name.into(),
            parent: None,
            behavior: None,
            enter: None,
            exit: None,
        }
    }
}

/// Fluent builder for a single state registration.
///
/// Created by [`Topology::state`]; consumed by
/// [`register`](StateBuilder::register).
pub struct StateBuilder<'a, C> {
    topology: &'a mut Topology<C>,
    name: String,
    parent: Option<StateId>,
    behavior: Option<Box<dyn Behavior<C> + Send + Sync>>,
    enter: Option<HookFn<C>>,
    exit: Option<HookFn<C>>,
}

impl<'a, C: 'static> StateBuilder<'a, C> {
    /// Nest the state under `parent`. Omitting this makes it a root.
    pub fn parent(mut self, parent: StateId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Run `hook` whenever the state is entered.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(StateId, &ActivePath<'_>, &mut C) + Send + Sync + 'static,
    {
        self.enter = Some(Box::new(hook));
        self
    }

    /// Run `hook` whenever the state is exited.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(StateId, &ActivePath<'_>, &mut C) + Send + Sync + 'static,
    {
        self.exit = Some(Box::new(hook));
        self
    }

    /// Attach a full [`Behavior`] implementation.
    ///
    /// Takes precedence over hooks set with
    /// [`on_enter`](StateBuilder::on_enter)/[`on_exit`](StateBuilder::on_exit).
    pub fn behavior<B>(mut self, behavior: B) -> Self
    where
        B: Behavior<C> + Send + Sync + 'static,
    {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Register the state and obtain its id.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownParent`] if the declared parent was not issued
    /// by this topology; nothing is registered.
    pub fn register(self) -> Result<StateId, BuildError> {
        if let Some(parent) = self.parent {
            if !self.topology.contains(parent) {
                return Err(BuildError::UnknownParent(parent));
            }
        }
        let behavior: Box<dyn Behavior<C> + Send + Sync> = match self.behavior {
            Some(behavior) => behavior,
            None if self.enter.is_some() || self.exit.is_some() => Box::new(Hooks {
                enter: self.enter,
                exit: self.exit,
            }),
            None => Box::new(Passive),
        };
        Ok(self.topology.insert(self.name, self.parent, behavior))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Machine;

    #[test]
    fn registers_roots_and_children() {
        let mut topology: Topology<()> = Topology::new();
        let root = topology.state("root").register().unwrap();
        let child = topology.state("child").parent(root).register().unwrap();

        assert_eq!(topology.len(), 2);
        assert_eq!(topology.parent(child), Some(root));
        assert_eq!(topology.name(root), Some("root"));
        assert_eq!(topology.name(child), Some("child"));
    }

    #[test]
    fn rejects_parents_from_another_topology() {
        let mut other: Topology<()> = Topology::new();
        other.state("a").register().unwrap();
        other.state("b").register().unwrap();
        let foreign = other.state("c").register().unwrap();

        let mut topology: Topology<()> = Topology::new();
        let err = topology
            .state("orphan")
            .parent(foreign)
            .register()
            .unwrap_err();

        assert_eq!(err, BuildError::UnknownParent(foreign));
        assert!(topology.is_empty());
    }

    #[test]
    fn closure_hooks_fire_on_enter_and_exit() {
        let mut topology: Topology<Vec<&'static str>> = Topology::new();
        let noisy = topology
            .state("noisy")
            .on_enter(|_id, _path, log: &mut Vec<&'static str>| log.push("in"))
            .on_exit(|_id, _path, log: &mut Vec<&'static str>| log.push("out"))
            .register()
            .unwrap();

        let mut machine: Machine = Machine::new();
        let mut log = Vec::new();
        machine.goto(&topology, &mut log, Some(noisy)).unwrap();
        machine.goto(&topology, &mut log, None).unwrap();

        assert_eq!(log, vec!["in", "out"]);
    }

    #[test]
    fn behavior_takes_precedence_over_hooks() {
        struct Counting;

        impl Behavior<usize> for Counting {
            fn on_enter(&self, _state: StateId, _path: &ActivePath<'_>, count: &mut usize) {
                *count += 1;
            }
        }

        let mut topology: Topology<usize> = Topology::new();
        let counted = topology
            .state("counted")
            .on_enter(|_id, _path, count: &mut usize| *count += 100)
            .behavior(Counting)
            .register()
            .unwrap();

        let mut machine: Machine = Machine::new();
        let mut count = 0;
        machine.goto(&topology, &mut count, Some(counted)).unwrap();

        assert_eq!(count, 1);
    }
}
