//! Objects whose state is driven by a machine.

use super::identifier::Identifier;

/// A caller-owned object carrying a current state.
///
/// The engine only reads and writes the state through this trait; it never
/// creates or drops targets. Execution borrows the target mutably, so at most
/// one `fire`/`fire_chain` can touch a given target at a time.
///
/// # Example
///
/// ```rust
/// use machina::core::Stateful;
/// use machina::identifier_enum;
///
/// identifier_enum! {
///     enum Phase {
///         Draft,
///         Published,
///     }
/// }
///
/// struct Article {
///     phase: Phase,
/// }
///
/// impl Stateful<Phase> for Article {
///     fn state(&self) -> Phase {
///         self.phase.clone()
///     }
///
///     fn set_state(&mut self, state: Phase) {
///         self.phase = state;
///     }
/// }
/// ```
pub trait Stateful<S: Identifier> {
    /// Current state of the object.
    fn state(&self) -> S;

    /// Replace the current state. Only the engine should call this.
    fn set_state(&mut self, state: S);
}
