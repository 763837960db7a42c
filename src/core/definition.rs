//! Transition and chain definitions.
//!
//! Definitions are created while a configuration is built and never change
//! afterwards. Both are identified by `(from, to, on)`: handlers and listeners
//! take no part in equality.

use super::identifier::Identifier;
use super::listener::ListenerDescriptor;
use crate::error::HandlerError;
use std::fmt;
use std::sync::Arc;

/// Effect handler of a transition: `(from, to, on, target)`.
///
/// Handlers may change the target's domain fields; the engine owns the state
/// field and commits it after the handler returns `Ok`.
pub type Handler<S, E, T> =
    Arc<dyn Fn(&S, &S, &E, &mut T) -> Result<(), HandlerError> + Send + Sync>;

/// One allowed single-step change of state.
pub struct TransitionDefinition<S, E, T> {
    from: S,
    to: S,
    on: E,
    handler_name: String,
    handler: Handler<S, E, T>,
    listeners: Vec<ListenerDescriptor<E, T>>,
}

impl<S: Identifier, E: Identifier, T> TransitionDefinition<S, E, T> {
    pub(crate) fn new(
        from: S,
        to: S,
        on: E,
        handler_name: String,
        handler: Handler<S, E, T>,
        listeners: Vec<ListenerDescriptor<E, T>>,
    ) -> Self {
        Self {
            from,
            to,
            on,
            handler_name,
            handler,
            listeners,
        }
    }

    /// State the transition leaves.
    pub fn from(&self) -> &S {
        &self.from
    }

    /// State the transition enters.
    pub fn to(&self) -> &S {
        &self.to
    }

    /// Event that triggers the transition.
    pub fn on(&self) -> &E {
        &self.on
    }

    /// Name the effect handler was registered under.
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Listeners invoked around this transition, in order.
    pub fn listeners(&self) -> &[ListenerDescriptor<E, T>] {
        &self.listeners
    }

    /// Check whether this transition fires for `event` from `state`.
    ///
    /// Only the `from` state is considered: a target sitting in the
    /// transition's `to` state does not match.
    pub fn matches(&self, event: &E, state: &S) -> bool {
        self.on == *event && self.from == *state
    }

    pub(crate) fn run_handler(&self, target: &mut T) -> Result<(), HandlerError> {
        (self.handler)(&self.from, &self.to, &self.on, target)
    }
}

impl<S: Clone, E: Clone, T> Clone for TransitionDefinition<S, E, T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            on: self.on.clone(),
            handler_name: self.handler_name.clone(),
            handler: Arc::clone(&self.handler),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: PartialEq, E: PartialEq, T> PartialEq for TransitionDefinition<S, E, T> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.on == other.on
    }
}

impl<S: fmt::Debug, E: fmt::Debug, T> fmt::Debug for TransitionDefinition<S, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDefinition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("on", &self.on)
            .field("handler", &self.handler_name)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// An automated multi-step change, resolved to an ordered path of transitions.
///
/// `parts` is never empty, starts at `from`, ends at `to`, and every part
/// starts where the previous one ended.
pub struct ChainDefinition<S, E, T, C> {
    from: S,
    to: S,
    on: C,
    parts: Vec<TransitionDefinition<S, E, T>>,
    listeners: Vec<ListenerDescriptor<C, T>>,
}

impl<S: Identifier, E: Identifier, T, C: Identifier> ChainDefinition<S, E, T, C> {
    /// Only the chain resolver produces `parts`.
    pub(crate) fn new(from: S, to: S, on: C, parts: Vec<TransitionDefinition<S, E, T>>) -> Self {
        Self {
            from,
            to,
            on,
            parts,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn add_listener(&mut self, listener: ListenerDescriptor<C, T>) {
        self.listeners.push(listener);
    }

    /// State the chain starts at.
    pub fn from(&self) -> &S {
        &self.from
    }

    /// State the chain ends at.
    pub fn to(&self) -> &S {
        &self.to
    }

    /// Chain name.
    pub fn on(&self) -> &C {
        &self.on
    }

    /// Resolved transitions, in execution order.
    pub fn parts(&self) -> &[TransitionDefinition<S, E, T>] {
        &self.parts
    }

    /// Chain listeners invoked around all parts.
    pub fn listeners(&self) -> &[ListenerDescriptor<C, T>] {
        &self.listeners
    }

    pub fn matches(&self, chain: &C, state: &S) -> bool {
        self.on == *chain && self.from == *state
    }
}

impl<S: Clone, E: Clone, T, C: Clone> Clone for ChainDefinition<S, E, T, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            on: self.on.clone(),
            parts: self.parts.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: PartialEq, E, T, C: PartialEq> PartialEq for ChainDefinition<S, E, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.on == other.on
    }
}

impl<S: fmt::Debug, E: fmt::Debug, T, C: fmt::Debug> fmt::Debug for ChainDefinition<S, E, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainDefinition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("on", &self.on)
            .field("parts", &self.parts)
            .field("listeners", &self.listeners)
            .finish()
    }
}
