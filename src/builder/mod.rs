//! Builder API for ergonomic configuration construction.
//!
//! This module provides fluent builders and macros for declaring transitions,
//! chains and listeners with minimal boilerplate while keeping the resulting
//! configuration immutable.

pub mod configuration;
pub mod error;
pub mod macros;
pub mod transition;

pub use configuration::{ChainScope, ConfigurationBuilder, DEFAULT_MACHINE_TYPE};
pub use error::BuildError;
pub use transition::{TransitionBuilder, NOOP_HANDLER};

use crate::core::{HandlerError, Identifier, TransitionDefinition};
use std::sync::Arc;

/// Create a transition whose handler does nothing.
///
/// # Example
///
/// ```
/// use machina::builder::simple_transition;
/// use machina::core::TransitionDefinition;
/// use machina::identifier_enum;
///
/// identifier_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// identifier_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition: TransitionDefinition<MyState, MyEvent, ()> =
///     simple_transition(MyState::Start, MyState::End, MyEvent::Finish);
/// assert_eq!(transition.handler_name(), "noop");
/// ```
pub fn simple_transition<S, E, T>(from: S, to: S, on: E) -> TransitionDefinition<S, E, T>
where
    S: Identifier,
    E: Identifier,
    T: 'static,
{
    TransitionDefinition::new(
        from,
        to,
        on,
        NOOP_HANDLER.to_string(),
        Arc::new(|_: &S, _: &S, _: &E, _: &mut T| -> Result<(), HandlerError> { Ok(()) }),
        Vec::new(),
    )
}
