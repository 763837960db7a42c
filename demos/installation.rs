//! Plugin Installation
//!
//! This example demonstrates a plugin lifecycle driven by events and chains.
//!
//! Key concepts:
//! - Plugin states (Available -> Registered -> Activated -> ... -> Deleted)
//! - Effect handlers mutating the plugin
//! - Before/after listeners on transitions and chains
//! - Chains resolved to shortest transition paths at build time
//!
//! Run with: cargo run --example installation

use machina::builder::{ChainScope, ConfigurationBuilder, TransitionBuilder};
use machina::core::{
    AfterHook, BeforeHook, HandlerError, HookError, Identifier, Listener, ListenerDescriptor,
    Stateful,
};
use machina::engine::StateMachine;
use machina::identifier_enum;

identifier_enum! {
    enum Status {
        Available,
        Registered,
        Activated,
        Deactivated,
        Parked,
        Unregistered,
        Deleted,
    }
}

identifier_enum! {
    enum Event {
        Register,
        Activate,
        Deactivate,
        Park,
        Unregister,
        Delete,
    }
}

identifier_enum! {
    enum Chain {
        Installing,
        Parking,
        Deletion,
    }
}

// Plugin entity
struct Plugin {
    name: String,
    status: Status,
    activations: u32,
}

impl Stateful<Status> for Plugin {
    fn state(&self) -> Status {
        self.status
    }

    fn set_state(&mut self, state: Status) {
        self.status = state;
    }
}

// Effectful handlers
fn activate(_from: &Status, _to: &Status, _on: &Event, plugin: &mut Plugin) -> Result<(), HandlerError> {
    plugin.activations += 1;
    println!("  Activating {} (activation #{})", plugin.name, plugin.activations);
    Ok(())
}

fn delete(_from: &Status, _to: &Status, _on: &Event, plugin: &mut Plugin) -> Result<(), HandlerError> {
    if plugin.activations == 0 {
        return Err(HandlerError::new(format!(
            "{} was never activated and can't be deleted",
            plugin.name
        )));
    }
    println!("  Deleting {}", plugin.name);
    Ok(())
}

// Listeners
struct Console;

impl Listener for Console {
    fn create() -> Result<Self, HookError> {
        Ok(Console)
    }
}

impl AfterHook<Event, Plugin> for Console {
    fn after(&mut self, on: &Event, plugin: &mut Plugin) -> Result<(), HookError> {
        println!("  [{}] {} is now {}", on.name(), plugin.name, plugin.status.name());
        Ok(())
    }
}

impl BeforeHook<Chain, Plugin> for Console {
    fn before(&mut self, on: &Chain, plugin: &mut Plugin) -> Result<(), HookError> {
        println!("  >> {} {}", on.name(), plugin.name);
        Ok(())
    }
}

impl AfterHook<Chain, Plugin> for Console {
    fn after(&mut self, on: &Chain, plugin: &mut Plugin) -> Result<(), HookError> {
        println!("  << {} {}", on.name(), plugin.name);
        Ok(())
    }
}

fn step(from: Status, to: Status, on: Event) -> TransitionBuilder<Status, Event, Plugin> {
    TransitionBuilder::new()
        .from(from)
        .to(to)
        .on(on)
        .succeeds()
        .listener(ListenerDescriptor::after::<Console>())
}

fn main() {
    println!("=== Plugin Installation Example ===\n");

    let configuration = ConfigurationBuilder::new()
        .machine_type("PluginMachine")
        .transition(step(Status::Available, Status::Registered, Event::Register))
        .unwrap()
        .transition(step(Status::Registered, Status::Activated, Event::Activate).handler("activate", activate))
        .unwrap()
        .transition(step(Status::Parked, Status::Activated, Event::Activate).handler("activate", activate))
        .unwrap()
        .transition(step(Status::Registered, Status::Deleted, Event::Delete).handler("delete", delete))
        .unwrap()
        .transition(step(Status::Unregistered, Status::Deleted, Event::Delete).handler("delete", delete))
        .unwrap()
        .transition(step(Status::Activated, Status::Deactivated, Event::Deactivate))
        .unwrap()
        .transition(step(Status::Deactivated, Status::Unregistered, Event::Unregister))
        .unwrap()
        .transition(step(Status::Parked, Status::Unregistered, Event::Unregister))
        .unwrap()
        .transition(step(Status::Deactivated, Status::Parked, Event::Park))
        .unwrap()
        .chain(Status::Available, Status::Activated, Chain::Installing)
        .chain(Status::Activated, Status::Parked, Chain::Parking)
        .chain(Status::Activated, Status::Deleted, Chain::Deletion)
        .chain(Status::Parked, Status::Deleted, Chain::Deletion)
        .chain_listener(ListenerDescriptor::both::<Console>(), ChainScope::All)
        .build()
        .unwrap();

    for chain in configuration.chains() {
        println!(
            "Chain {} from {} to {}: {} parts",
            chain.on().name(),
            chain.from().name(),
            chain.to().name(),
            chain.parts().len()
        );
    }
    println!();

    let machine = StateMachine::new(configuration).unwrap();

    // Scenario 1: Single events
    println!("Scenario 1: Register and Activate");
    let mut first = Plugin {
        name: "metrics".to_string(),
        status: Status::Available,
        activations: 0,
    };
    machine.fire(&Event::Register, &mut first).unwrap();
    machine.fire(&Event::Activate, &mut first).unwrap();
    println!("  ✓ {} activated\n", first.name);

    // Scenario 2: Chains
    println!("Scenario 2: Install, Park and Delete");
    let mut second = Plugin {
        name: "search".to_string(),
        status: Status::Available,
        activations: 0,
    };
    machine.fire_chain(&Chain::Installing, &mut second).unwrap();
    machine.fire_chain(&Chain::Parking, &mut second).unwrap();
    machine.fire_chain(&Chain::Deletion, &mut second).unwrap();
    println!("  ✓ {} deleted\n", second.name);

    // Scenario 3: Rejected event
    println!("Scenario 3: Activate from Available");
    let mut third = Plugin {
        name: "backup".to_string(),
        status: Status::Available,
        activations: 0,
    };
    match machine.fire(&Event::Activate, &mut third) {
        Ok(()) => println!("  Unexpected success"),
        Err(error) => println!("  ✗ {error}"),
    }
    println!();

    // Scenario 4: Failing handler
    println!("Scenario 4: Delete a never activated plugin");
    machine.fire(&Event::Register, &mut third).unwrap();
    match machine.fire(&Event::Delete, &mut third) {
        Ok(()) => println!("  Unexpected success"),
        Err(error) => println!("  ✗ {error} (still {})", third.status.name()),
    }

    println!("\n=== Example Complete ===");
}
