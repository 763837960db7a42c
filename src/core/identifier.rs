//! Symbolic identifiers for states, events and chains.
//!
//! A machine type is parameterised by three independent closed sets of
//! identifiers. All of them share the [`Identifier`] trait, which only asks
//! for value equality and a display name.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for the closed identifier sets of a machine: states, events and
/// chain names.
///
/// Identifiers are plain values. Equality is value equality and no ordering
/// is defined. The `Hash` bound exists so the chain resolver can index states
/// while searching the transition graph.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: identifiers are compared and indexed
/// - `Debug`: identifiers appear in diagnostics
/// - `Serialize` + `Deserialize`: identifiers can be read from a machine table
///
/// # Example
///
/// ```rust
/// use machina::core::Identifier;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum AppState {
///     Available,
///     Registered,
/// }
///
/// impl Identifier for AppState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Available => "AVAILABLE",
///             Self::Registered => "REGISTERED",
///         }
///     }
/// }
///
/// assert_eq!(AppState::Registered.name(), "REGISTERED");
/// ```
pub trait Identifier:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the identifier's name for display/logging.
    fn name(&self) -> &str;
}

/// Chain type of machines that declare no chains.
///
/// The enum is uninhabited, so `fire_chain` can never be called on a machine
/// using it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NoChain {}

impl Identifier for NoChain {
    fn name(&self) -> &str {
        match *self {}
    }
}
