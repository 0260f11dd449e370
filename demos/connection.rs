//! Connection lifecycle
//!
//! Demonstrates least-common-ancestor pruning on a nested connection tree:
//!
//! ```text
//! offline    online
//!            └── authenticated
//!                ├── idle
//!                └── syncing
//! ```
//!
//! Key concepts:
//! - Declaring a topology with the `state_tree!` macro
//! - Transitions between sibling leaves keep the shared ancestors active
//! - `jump` forces a known path without running hooks
//! - A machine that is too shallow reports capacity exhaustion and rests
//!   on the deepest valid prefix of the target path
//!
//! Run with: cargo run --example connection

use nestate::{Machine, Topology};

fn print_path<const N: usize>(label: &str, machine: &Machine<N>, topology: &Topology) {
    let names: Vec<&str> = machine
        .path()
        .iter()
        .filter_map(|id| topology.name(id))
        .collect();
    println!("  {label}: [{}]", names.join(" -> "));
}

fn main() {
    println!("=== Connection Lifecycle ===\n");

    let mut topology: Topology = Topology::new();
    nestate::state_tree! {
        in topology;
        offline,
        online {
            authenticated {
                idle,
                syncing,
            },
        },
    }

    let mut machine: Machine = Machine::new();

    println!("Boot straight into a known state (no hooks run):");
    machine.jump(&topology, Some(offline)).unwrap();
    print_path("after jump", &machine, &topology);

    println!("\nConnect and start syncing:");
    machine.goto(&topology, &mut (), Some(syncing)).unwrap();
    print_path("after goto", &machine, &topology);

    println!("\nSync finished; drop back to idle:");
    machine.goto(&topology, &mut (), Some(idle)).unwrap();
    print_path("after goto", &machine, &topology);
    println!("  `online` and `authenticated` stayed active across the switch");
    assert!(machine.contains(online));
    assert!(machine.contains(authenticated));
    assert!(!machine.contains(syncing));

    println!("\nConnection lost:");
    machine.goto(&topology, &mut (), Some(offline)).unwrap();
    print_path("after goto", &machine, &topology);
    assert!(!machine.contains(online));

    println!("\nA two-slot machine cannot reach `syncing` (depth 3):");
    let mut shallow: Machine<2> = Machine::new();
    let err = shallow.goto(&topology, &mut (), Some(syncing)).unwrap_err();
    println!("  error: {err}");
    print_path("rests on", &shallow, &topology);

    println!("\n=== Example Complete ===");
}
