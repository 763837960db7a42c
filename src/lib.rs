//! Machina: a declarative finite state machine runtime
//!
//! Machina separates what a machine *is* from what it *does*. A machine type
//! is declared once as an immutable [`Configuration`]: transitions between
//! states, named chains of transitions, and listeners observing them. A
//! [`StateMachine`] then fires events and chains against any number of
//! caller-owned targets.
//!
//! # Core Concepts
//!
//! - **Identifiers**: states, events and chain names via the `Identifier` trait
//! - **Targets**: caller-owned objects carrying a state via `Stateful`
//! - **Transitions**: `from -> to` on an event, with an effect handler
//! - **Chains**: shortest transition paths, resolved when the configuration is built
//! - **Listeners**: before/after hooks around transitions and chains
//!
//! # Example
//!
//! ```rust
//! use machina::builder::{ConfigurationBuilder, TransitionBuilder};
//! use machina::core::Stateful;
//! use machina::engine::StateMachine;
//! use machina::identifier_enum;
//!
//! identifier_enum! {
//!     enum Status {
//!         Available,
//!         Registered,
//!         Activated,
//!     }
//! }
//!
//! identifier_enum! {
//!     enum Event {
//!         Register,
//!         Activate,
//!     }
//! }
//!
//! identifier_enum! {
//!     enum Chain {
//!         Installing,
//!     }
//! }
//!
//! struct Plugin {
//!     status: Status,
//!     installs: u32,
//! }
//!
//! impl Stateful<Status> for Plugin {
//!     fn state(&self) -> Status {
//!         self.status
//!     }
//!
//!     fn set_state(&mut self, state: Status) {
//!         self.status = state;
//!     }
//! }
//!
//! let configuration = ConfigurationBuilder::new()
//!     .machine_type("PluginMachine")
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Status::Available)
//!             .to(Status::Registered)
//!             .on(Event::Register)
//!             .handler("count", |_, _, _, plugin: &mut Plugin| {
//!                 plugin.installs += 1;
//!                 Ok(())
//!             }),
//!     )
//!     .unwrap()
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Status::Registered)
//!             .to(Status::Activated)
//!             .on(Event::Activate)
//!             .succeeds(),
//!     )
//!     .unwrap()
//!     .chain(Status::Available, Status::Activated, Chain::Installing)
//!     .build()
//!     .unwrap();
//!
//! let machine = StateMachine::new(configuration).unwrap();
//! let mut plugin = Plugin { status: Status::Available, installs: 0 };
//!
//! machine.fire_chain(&Chain::Installing, &mut plugin).unwrap();
//! assert_eq!(plugin.status, Status::Activated);
//! assert_eq!(plugin.installs, 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use builder::{ChainScope, ConfigurationBuilder, TransitionBuilder};
pub use config::{Configuration, MachineTable, Registry};
pub use core::{Hook, Identifier, ListenerDescriptor, Stateful};
pub use engine::StateMachine;
pub use error::EngineError;
