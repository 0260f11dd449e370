//! Property-based tests for the transition engine.
//!
//! These tests use proptest to drive random state trees through random
//! transition sequences and check the machine against a plain-vector
//! reference model: same active path, same hook order, same failures.

use nestate::{Machine, StateId, Topology, TransitionError};
use proptest::prelude::*;

const MAX_DEPTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefEvent {
    Entered(usize),
    Exited(usize),
}

/// A random forest (parent index always lower than the child's) plus a
/// random sequence of transition targets.
#[derive(Debug, Clone)]
struct TreeCase {
    parents: Vec<Option<usize>>,
    targets: Vec<Option<usize>>,
}

prop_compose! {
    fn arbitrary_tree()
        (seeds in prop::collection::vec(0..100usize, 1..12))
        (targets in prop::collection::vec(prop::option::of(0..seeds.len()), 1..8),
         seeds in Just(seeds))
        -> TreeCase {
        let parents = seeds
            .iter()
            .enumerate()
            .map(|(index, &seed)| {
                if index == 0 || seed % (index + 1) == 0 {
                    None
                } else {
                    Some(seed % index)
                }
            })
            .collect();
        TreeCase { parents, targets }
    }
}

/// Register the forest with recording hooks; returns the arena plus the
/// node-index -> id mapping.
fn build_topology(parents: &[Option<usize>]) -> (Topology<Vec<RefEvent>>, Vec<StateId>) {
    let mut topology: Topology<Vec<RefEvent>> = Topology::new();
    let mut ids = Vec::with_capacity(parents.len());
    for (index, parent) in parents.iter().enumerate() {
        let builder = topology
            .state(format!("s{index}"))
            .on_enter(move |_id, _path, events: &mut Vec<RefEvent>| {
                events.push(RefEvent::Entered(index));
            })
            .on_exit(move |_id, _path, events: &mut Vec<RefEvent>| {
                events.push(RefEvent::Exited(index));
            });
        let builder = match parent {
            Some(parent) => builder.parent(ids[*parent]),
            None => builder,
        };
        ids.push(builder.register().unwrap());
    }
    (topology, ids)
}

/// Root-to-leaf ancestor chain of `node`, by walking the parent vector.
fn chain(parents: &[Option<usize>], node: usize) -> Vec<usize> {
    let mut chain = vec![node];
    let mut cursor = parents[node];
    while let Some(parent) = cursor {
        chain.push(parent);
        cursor = parents[parent];
    }
    chain.reverse();
    chain
}

/// Apply one transition to the reference model. Returns the expected hook
/// events and whether the machine is expected to report capacity exhaustion.
fn apply_reference(
    parents: &[Option<usize>],
    current: &mut Vec<usize>,
    target: Option<usize>,
) -> (Vec<RefEvent>, bool) {
    if current.last().copied() == target {
        return (Vec::new(), false);
    }
    let full = target.map(|node| chain(parents, node)).unwrap_or_default();
    let truncated = full.len() > MAX_DEPTH;
    let landing = &full[..full.len().min(MAX_DEPTH)];

    let mut shared = 0;
    while shared < current.len()
        && shared < landing.len()
        && current[shared] == landing[shared]
    {
        shared += 1;
    }

    let mut events = Vec::new();
    for &exited in current[shared..].iter().rev() {
        events.push(RefEvent::Exited(exited));
    }
    for &entered in &landing[shared..] {
        events.push(RefEvent::Entered(entered));
    }
    *current = landing.to_vec();
    (events, truncated)
}

proptest! {
    #[test]
    fn goto_follows_the_reference_model(case in arbitrary_tree()) {
        let (topology, ids) = build_topology(&case.parents);
        let mut machine: Machine<MAX_DEPTH> = Machine::new();
        let mut current: Vec<usize> = Vec::new();

        for &target in &case.targets {
            let mut events = Vec::new();
            let result = machine.goto(&topology, &mut events, target.map(|node| ids[node]));
            let (expected_events, truncated) =
                apply_reference(&case.parents, &mut current, target);

            prop_assert_eq!(&events, &expected_events);
            if truncated {
                prop_assert_eq!(
                    result,
                    Err(TransitionError::CapacityExceeded { capacity: MAX_DEPTH })
                );
            } else {
                prop_assert_eq!(result, Ok(()));
                prop_assert_eq!(machine.top(), target.map(|node| ids[node]));
            }

            // The active path is exactly the reference path, and membership
            // agrees for every state in the tree.
            let active: Vec<StateId> = machine.path().iter().collect();
            let expected_active: Vec<StateId> =
                current.iter().map(|&node| ids[node]).collect();
            prop_assert_eq!(active, expected_active);
            for (node, &id) in ids.iter().enumerate() {
                prop_assert_eq!(machine.contains(id), current.contains(&node));
            }
        }
    }

    #[test]
    fn repeating_a_transition_is_a_silent_no_op(case in arbitrary_tree()) {
        let (topology, ids) = build_topology(&case.parents);
        let mut machine: Machine<MAX_DEPTH> = Machine::new();

        for &target in &case.targets {
            let mut events = Vec::new();
            let outcome = machine.goto(&topology, &mut events, target.map(|node| ids[node]));
            if outcome.is_err() {
                continue;
            }

            let snapshot = machine.clone();
            events.clear();
            machine
                .goto(&topology, &mut events, target.map(|node| ids[node]))
                .unwrap();
            prop_assert!(events.is_empty());
            prop_assert_eq!(&machine, &snapshot);
        }
    }

    #[test]
    fn jump_runs_no_hooks_and_goto_after_jump_is_a_no_op(case in arbitrary_tree()) {
        let (topology, ids) = build_topology(&case.parents);

        for &target in &case.targets {
            let mut machine: Machine<MAX_DEPTH> = Machine::new();
            machine.jump(&topology, target.map(|node| ids[node])).unwrap();

            let full = target.map(|node| chain(&case.parents, node)).unwrap_or_default();
            let landing: Vec<StateId> = full[..full.len().min(MAX_DEPTH)]
                .iter()
                .map(|&node| ids[node])
                .collect();
            let active: Vec<StateId> = machine.path().iter().collect();
            prop_assert_eq!(active, landing);

            if full.len() <= MAX_DEPTH {
                let mut events = Vec::new();
                machine
                    .goto(&topology, &mut events, target.map(|node| ids[node]))
                    .unwrap();
                prop_assert!(events.is_empty());
            }
        }
    }

    #[test]
    fn forward_of_matches_the_parent_walk(case in arbitrary_tree()) {
        let (topology, ids) = build_topology(&case.parents);

        for node in 0..case.parents.len() {
            let expected: Vec<StateId> = chain(&case.parents, node)
                .into_iter()
                .map(|ancestor| ids[ancestor])
                .collect();

            let mut buffer = [None; 16];
            let written = topology.forward_of(Some(ids[node]), &mut buffer);
            prop_assert_eq!(written, expected.len());
            let filled: Vec<StateId> = buffer[..written].iter().copied().flatten().collect();
            prop_assert_eq!(&filled, &expected);

            // A short buffer keeps the outermost states.
            let mut short = [None; 2];
            let written = topology.forward_of(Some(ids[node]), &mut short);
            prop_assert_eq!(written, expected.len().min(2));
            let filled: Vec<StateId> = short[..written].iter().copied().flatten().collect();
            prop_assert_eq!(&filled, &expected[..written].to_vec());
        }
    }
}
