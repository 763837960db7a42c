//! Table Machine
//!
//! This example demonstrates loading a machine from a JSON table.
//!
//! Key concepts:
//! - Transitions and chains declared as data
//! - Handlers and listeners registered by name
//! - Binding a table to a configuration
//! - One shared machine driving several documents
//!
//! Run with: cargo run --example table_machine

use machina::config::{MachineTable, Registry};
use machina::core::{AfterHook, HandlerError, HookError, Identifier, Listener, ListenerDescriptor, Stateful};
use machina::engine::StateMachine;
use machina::identifier_enum;

identifier_enum! {
    enum Phase {
        Draft,
        Review,
        Published,
        Archived,
    }
}

identifier_enum! {
    enum Action {
        Submit,
        Approve,
        Reject,
        Archive,
    }
}

identifier_enum! {
    enum Flow {
        Release,
    }
}

const TABLE: &str = r#"{
    "machine_type": "DocumentMachine",
    "transitions": [
        {"from": "Draft", "to": "Review", "on": "Submit", "handler": "stamp"},
        {"from": "Review", "to": "Published", "on": "Approve", "handler": "stamp",
         "listeners": ["notify"]},
        {"from": "Review", "to": "Draft", "on": "Reject"},
        {"from": "Published", "to": "Archived", "on": "Archive", "handler": "noop"}
    ],
    "chains": [
        {"from": "Draft", "to": "Published", "on": "Release"}
    ],
    "chain_listeners": [
        {"listener": "notify", "chains": ["ALL"]}
    ]
}"#;

struct Document {
    title: String,
    phase: Phase,
    revisions: u32,
}

impl Stateful<Phase> for Document {
    fn state(&self) -> Phase {
        self.phase
    }

    fn set_state(&mut self, state: Phase) {
        self.phase = state;
    }
}

fn stamp(from: &Phase, to: &Phase, _on: &Action, document: &mut Document) -> Result<(), HandlerError> {
    document.revisions += 1;
    println!(
        "  {}: {} -> {} (revision {})",
        document.title,
        from.name(),
        to.name(),
        document.revisions
    );
    Ok(())
}

struct Notify;

impl Listener for Notify {
    fn create() -> Result<Self, HookError> {
        Ok(Notify)
    }
}

impl AfterHook<Action, Document> for Notify {
    fn after(&mut self, on: &Action, document: &mut Document) -> Result<(), HookError> {
        println!("  [notify] {} after {}", document.title, on.name());
        Ok(())
    }
}

impl AfterHook<Flow, Document> for Notify {
    fn after(&mut self, on: &Flow, document: &mut Document) -> Result<(), HookError> {
        println!("  [notify] {} finished {}", document.title, on.name());
        Ok(())
    }
}

fn main() {
    println!("=== Table Machine Example ===\n");

    let table: MachineTable<Phase, Action, Flow> = MachineTable::from_json(TABLE).unwrap();

    let registry = Registry::<Phase, Action, Document, Flow>::new()
        .handler("stamp", stamp)
        .listener("notify", ListenerDescriptor::after::<Notify>())
        .chain_listener("notify", ListenerDescriptor::after::<Notify>());

    let configuration = table.bind(&registry).unwrap();
    println!(
        "Loaded {} with {} transitions and {} chain(s)\n",
        configuration.machine_type(),
        configuration.transitions().len(),
        configuration.chains().len()
    );

    let machine = StateMachine::new(configuration).unwrap();

    // Scenario 1: Review round trip
    println!("Scenario 1: Submit, Reject, Submit, Approve");
    let mut memo = Document {
        title: "memo".to_string(),
        phase: Phase::Draft,
        revisions: 0,
    };
    for action in [Action::Submit, Action::Reject, Action::Submit, Action::Approve] {
        machine.fire(&action, &mut memo).unwrap();
    }
    println!("  ✓ {} is {}\n", memo.title, memo.phase.name());

    // Scenario 2: Release chain
    println!("Scenario 2: Release");
    let mut report = Document {
        title: "report".to_string(),
        phase: Phase::Draft,
        revisions: 0,
    };
    machine.fire_chain(&Flow::Release, &mut report).unwrap();
    machine.fire(&Action::Archive, &mut report).unwrap();
    println!("  ✓ {} is {}\n", report.title, report.phase.name());

    // Scenario 3: Unknown handler name
    println!("Scenario 3: Table with an unregistered handler");
    let broken = TABLE.replace("\"handler\": \"stamp\"", "\"handler\": \"sign\"");
    let broken: MachineTable<Phase, Action, Flow> = MachineTable::from_json(&broken).unwrap();
    match broken.bind(&registry) {
        Ok(_) => println!("  Unexpected success"),
        Err(error) => println!("  ✗ {error}"),
    }

    println!("\n=== Example Complete ===");
}
