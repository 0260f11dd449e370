//! Engine start sequence
//!
//! A small engine controller with nested states:
//!
//! ```text
//! stopped    starting             running
//!            ├── igniting
//!            └── cranking
//! ```
//!
//! Key concepts:
//! - Entering `starting` immediately queues a transition into its
//!   `igniting` substate (hooks request follow-up transitions through a
//!   `TransitionQueue`, they never recurse into the machine)
//! - Sibling transitions (`igniting` -> `cranking`) keep `starting` active
//! - Membership tests against super-states
//!
//! Run with: cargo run --example engine

use nestate::{Machine, StateId, Topology, TransitionQueue};

#[derive(Default)]
struct Engine {
    queue: TransitionQueue,
    ignition: Option<StateId>,
    ignition_cycles: u32,
    crank_cycles: u32,
}

/// Apply a transition, then drain whatever the hooks queued up.
fn drive(
    machine: &mut Machine,
    topology: &Topology<Engine>,
    engine: &mut Engine,
    target: Option<StateId>,
) {
    machine.goto(topology, engine, target).unwrap();
    while let Some(next) = engine.queue.next_request() {
        machine.goto(topology, engine, next).unwrap();
    }
}

fn print_path(machine: &Machine, topology: &Topology<Engine>) {
    let names: Vec<&str> = machine
        .path()
        .iter()
        .filter_map(|id| topology.name(id))
        .collect();
    println!("  active path: [{}]", names.join(" -> "));
}

fn main() {
    println!("=== Engine Start Sequence ===\n");

    let mut topology: Topology<Engine> = Topology::new();
    let stopped = topology.state("stopped").register().unwrap();
    let starting = topology
        .state("starting")
        .on_enter(|_id, _path, engine: &mut Engine| {
            if let Some(ignition) = engine.ignition {
                engine.queue.request(ignition);
            }
        })
        .register()
        .unwrap();
    let igniting = topology
        .state("igniting")
        .parent(starting)
        .on_enter(|_id, _path, engine: &mut Engine| engine.ignition_cycles = 1)
        .register()
        .unwrap();
    let cranking = topology
        .state("cranking")
        .parent(starting)
        .on_enter(|_id, _path, engine: &mut Engine| engine.crank_cycles = 2)
        .register()
        .unwrap();
    let running = topology.state("running").register().unwrap();

    let mut engine = Engine {
        ignition: Some(igniting),
        ..Default::default()
    };
    let mut machine: Machine = Machine::new();

    println!("Ignition off:");
    drive(&mut machine, &topology, &mut engine, Some(stopped));
    print_path(&machine, &topology);

    println!("\nStarter engaged:");
    drive(&mut machine, &topology, &mut engine, Some(starting));
    print_path(&machine, &topology);
    assert!(machine.contains(starting));
    assert!(machine.contains(igniting));

    println!("\nCranking until the engine catches:");
    while machine.top() != Some(running) {
        let top = machine.top();
        if top == Some(igniting) {
            engine.ignition_cycles -= 1;
            if engine.ignition_cycles == 0 {
                engine.queue.request(cranking);
            }
        } else if top == Some(cranking) {
            engine.crank_cycles -= 1;
            if engine.crank_cycles == 0 {
                engine.queue.request(running);
            }
        }
        while let Some(next) = engine.queue.next_request() {
            machine.goto(&topology, &mut engine, next).unwrap();
        }
        print_path(&machine, &topology);
    }
    assert!(machine.contains(running));
    assert!(!machine.contains(starting));

    println!("\nKey switched off:");
    drive(&mut machine, &topology, &mut engine, Some(stopped));
    print_path(&machine, &topology);
    assert!(machine.contains(stopped));

    println!("\n=== Example Complete ===");
}
