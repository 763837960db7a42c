//! State machine that fires transitions and chains against targets.

use crate::config::Configuration;
use crate::core::{dispatch, Hook, Identifier, NoChain, Stateful, TransitionDefinition};
use crate::error::EngineError;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Executes the transitions and chains of a shared configuration.
///
/// The machine holds no per-target data; the same machine (or clones of it)
/// can drive any number of targets, from any number of threads. Each call
/// borrows its target mutably for the whole execution.
pub struct StateMachine<S, E, T, C = NoChain> {
    configuration: Arc<Configuration<S, E, T, C>>,
}

impl<S, E, T, C> StateMachine<S, E, T, C>
where
    S: Identifier,
    E: Identifier,
    C: Identifier,
    T: Stateful<S>,
{
    /// Create a machine around a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MachineCreation`] if the configuration has no
    /// transitions or violates a structural invariant.
    pub fn new(
        configuration: impl Into<Arc<Configuration<S, E, T, C>>>,
    ) -> Result<Self, EngineError> {
        let configuration = configuration.into();

        if let Validation::Failure(violations) = configuration.validate() {
            let reason = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(EngineError::MachineCreation {
                machine_type: configuration.machine_type().to_string(),
                reason,
            });
        }

        Ok(Self { configuration })
    }

    /// Get the shared configuration (pure)
    pub fn configuration(&self) -> &Configuration<S, E, T, C> {
        &self.configuration
    }

    /// Fire `event` on `target`.
    ///
    /// The transition is looked up by event and the target's current state.
    /// On success the target ends in the transition's `to` state.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTransition`] if no transition leaves the
    ///   current state on `event`; the target is untouched.
    /// - [`EngineError::TransitionInvocation`] if the handler fails; the
    ///   state is not advanced.
    /// - [`EngineError::InvalidTransitionListener`] if a hook fails; after
    ///   hooks run once the new state is already committed.
    pub fn fire(&self, event: &E, target: &mut T) -> Result<(), EngineError> {
        let current = target.state();

        let Some(transition) = self.configuration.find_transition(event, &current) else {
            return Err(EngineError::InvalidTransition {
                event: event.name().to_string(),
                reason: format!(
                    "State of target '{}' doesn't match required state for transition '{}'.",
                    current.name(),
                    event.name()
                ),
            });
        };

        self.execute(transition, target)
    }

    /// Fire the chain `chain` on `target`.
    ///
    /// Every part runs in order; the first failure stops the chain and
    /// earlier parts stay committed.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidTransitionChain`] if no chain named `chain`
    /// starts at the current state, otherwise any error of the parts or of
    /// the chain listeners.
    pub fn fire_chain(&self, chain: &C, target: &mut T) -> Result<(), EngineError> {
        let current = target.state();

        let Some(definition) = self.configuration.find_chain(chain, &current) else {
            return Err(EngineError::InvalidTransitionChain {
                chain: chain.name().to_string(),
                reason: format!(
                    "Couldn't find chain starting at state '{}'.",
                    current.name()
                ),
            });
        };

        dispatch(definition.listeners(), Hook::Before, definition.on(), target)?;

        for part in definition.parts() {
            self.execute(part, target)?;
        }

        dispatch(definition.listeners(), Hook::After, definition.on(), target)
    }

    /// Run a single known transition: before hooks, handler, state commit,
    /// after hooks.
    fn execute(
        &self,
        transition: &TransitionDefinition<S, E, T>,
        target: &mut T,
    ) -> Result<(), EngineError> {
        let current = target.state();
        if current != *transition.from() {
            return Err(EngineError::InvalidTransition {
                event: transition.on().name().to_string(),
                reason: format!(
                    "Current state {} doesn't match required state {}.",
                    current.name(),
                    transition.from().name()
                ),
            });
        }

        tracing::trace!(
            machine_type = self.configuration.machine_type(),
            on = transition.on().name(),
            from = transition.from().name(),
            to = transition.to().name(),
            "State change entered"
        );

        dispatch(transition.listeners(), Hook::Before, transition.on(), target)?;

        transition
            .run_handler(target)
            .map_err(|cause| EngineError::TransitionInvocation {
                event: transition.on().name().to_string(),
                handler: transition.handler_name().to_string(),
                cause,
            })?;

        target.set_state(transition.to().clone());

        dispatch(transition.listeners(), Hook::After, transition.on(), target)?;

        tracing::trace!(
            machine_type = self.configuration.machine_type(),
            on = transition.on().name(),
            "State change finished"
        );

        Ok(())
    }
}

impl<S, E, T, C> Clone for StateMachine<S, E, T, C> {
    fn clone(&self) -> Self {
        Self {
            configuration: Arc::clone(&self.configuration),
        }
    }
}
