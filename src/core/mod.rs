//! Core machine vocabulary.
//!
//! This module contains the data the engine works on:
//! - Identifiers for states, events and chains via the `Identifier` trait
//! - Targets whose state is driven via the `Stateful` trait
//! - Transition and chain definitions
//! - Listener descriptors and their hook capabilities
//!
//! Nothing here mutates after a configuration is built.

mod definition;
mod identifier;
mod listener;
mod target;

pub(crate) use listener::dispatch;

pub use crate::error::{HandlerError, HookError};
pub use definition::{ChainDefinition, Handler, TransitionDefinition};
pub use identifier::{Identifier, NoChain};
pub use listener::{AfterHook, BeforeHook, Hook, Listener, ListenerDescriptor};
pub use target::Stateful;
