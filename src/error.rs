//! Error types reported by configuration build and machine execution.

use crate::builder::BuildError;
use crate::core::Hook;
use thiserror::Error;

/// Errors that can occur while building a configuration or firing a machine.
///
/// Identifier values are carried by name so the error stays independent of
/// the machine's generic parameters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No transition matches the event from the target's current state.
    #[error("Transition '{event}' isn't possible. {reason}")]
    InvalidTransition { event: String, reason: String },

    /// No chain matches the chain name from the target's current state.
    #[error("Chain '{chain}' isn't possible. {reason}")]
    InvalidTransitionChain { chain: String, reason: String },

    /// The effect handler failed; the target's state was not advanced.
    #[error("Couldn't invoke handler '{handler}' for transition '{event}': {cause}")]
    TransitionInvocation {
        event: String,
        handler: String,
        #[source]
        cause: HandlerError,
    },

    /// A before/after hook failed. The state may already be committed.
    #[error("Transition listener [{listener_type}] not executable on hook '{hook}': {cause}")]
    InvalidTransitionListener {
        listener_type: String,
        hook: Hook,
        #[source]
        cause: HookError,
    },

    /// No path connects a declared chain's states. Fatal to the build.
    #[error("Couldn't create chain '{chain}'. There is no transition path from {from} to {to}")]
    TransitionChainCreation {
        from: String,
        to: String,
        chain: String,
    },

    /// A machine couldn't be created around a configuration.
    #[error("Couldn't create state machine '{machine_type}'. {reason}")]
    MachineCreation {
        machine_type: String,
        reason: String,
    },

    /// A declaration referenced something that doesn't exist.
    #[error("Argument '{argument}' isn't allowed: {reason}")]
    UnexpectedArgument { argument: String, reason: String },

    #[error("Machine table couldn't be parsed: {0}")]
    Table(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Failure reported by an effect handler.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported while constructing a listener or running one of its hooks.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
