//! Macros for declarative topology construction.

/// Register a nested tree of hook-less states, binding each name to a
/// local [`StateId`](crate::StateId).
///
/// The first argument is the topology variable to register into; the body
/// is the tree, with children in braces. States that need hooks are
/// registered afterwards through [`Topology::state`](crate::Topology::state),
/// using the bound ids as parents.
///
/// # Example
///
/// ```rust
/// use nestate::Topology;
///
/// let mut topology: Topology = Topology::new();
/// nestate::state_tree! {
///     in topology;
///     disconnected,
///     connected {
///         idle,
///         busy,
///     },
/// }
///
/// assert_eq!(topology.parent(busy), Some(connected));
/// assert_eq!(topology.parent(disconnected), None);
/// assert_eq!(topology.name(idle), Some("idle"));
/// ```
#[macro_export]
macro_rules! state_tree {
    (in $topology:ident; $($tree:tt)*) => {
        $crate::state_tree!(@roots ($topology) $($tree)*);
    };

    // Root with nested children.
    (@roots ($topology:ident) $name:ident { $($children:tt)* } $(, $($rest:tt)*)?) => {
        let $name = $topology
            .state(stringify!($name))
            .register()
            .expect("registration without a parent cannot fail");
        $crate::state_tree!(@children ($topology) ($name) $($children)*);
        $($crate::state_tree!(@roots ($topology) $($rest)*);)?
    };

    // Root leaf.
    (@roots ($topology:ident) $name:ident $(, $($rest:tt)*)?) => {
        let $name = $topology
            .state(stringify!($name))
            .register()
            .expect("registration without a parent cannot fail");
        $($crate::state_tree!(@roots ($topology) $($rest)*);)?
    };

    (@roots ($topology:ident)) => {};

    // Child with nested children.
    (@children ($topology:ident) ($parent:ident) $name:ident { $($children:tt)* } $(, $($rest:tt)*)?) => {
        let $name = $topology
            .state(stringify!($name))
            .parent($parent)
            .register()
            .expect("parent was registered just above");
        $crate::state_tree!(@children ($topology) ($name) $($children)*);
        $($crate::state_tree!(@children ($topology) ($parent) $($rest)*);)?
    };

    // Child leaf.
    (@children ($topology:ident) ($parent:ident) $name:ident $(, $($rest:tt)*)?) => {
        let $name = $topology
            .state(stringify!($name))
            .parent($parent)
            .register()
            .expect("parent was registered just above");
        $($crate::state_tree!(@children ($topology) ($parent) $($rest)*);)?
    };

    (@children ($topology:ident) ($parent:ident)) => {};
}

#[cfg(test)]
mod tests {
    use crate::core::{Machine, Topology};

    #[test]
    fn state_tree_binds_nested_states_to_ids() {
        let mut topology: Topology<()> = Topology::new();
        state_tree! {
            in topology;
            stopped,
            starting {
                igniting,
                cranking,
            },
            running,
        }

        assert_eq!(topology.len(), 5);
        assert_eq!(topology.parent(stopped), None);
        assert_eq!(topology.parent(starting), None);
        assert_eq!(topology.parent(igniting), Some(starting));
        assert_eq!(topology.parent(cranking), Some(starting));
        assert_eq!(topology.parent(running), None);
        assert_eq!(topology.name(running), Some("running"));
    }

    #[test]
    fn state_tree_supports_deep_nesting() {
        let mut topology: Topology<()> = Topology::new();
        state_tree! {
            in topology;
            session {
                established {
                    streaming,
                },
            },
        }

        assert_eq!(topology.parent(streaming), Some(established));
        assert_eq!(topology.parent(established), Some(session));
        assert_eq!(topology.parent(session), None);
    }

    #[test]
    fn state_tree_works_without_trailing_commas() {
        let mut topology: Topology<()> = Topology::new();
        state_tree! {
            in topology;
            lone
        }

        assert_eq!(topology.len(), 1);
        assert_eq!(topology.name(lone), Some("lone"));
    }

    #[test]
    fn machine_drives_a_macro_built_tree() {
        let mut topology: Topology<()> = Topology::new();
        state_tree! {
            in topology;
            parked,
            driving {
                cruising,
            },
        }

        let mut machine: Machine = Machine::new();
        machine.goto(&topology, &mut (), Some(cruising)).unwrap();
        assert!(machine.contains(driving));

        machine.goto(&topology, &mut (), Some(parked)).unwrap();
        assert!(!machine.contains(driving));
        assert_eq!(machine.top(), Some(parked));
    }
}
