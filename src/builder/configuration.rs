//! Builder for assembling machine configurations.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::config::{resolve_chain, Configuration};
use crate::core::{ChainDefinition, Identifier, ListenerDescriptor, NoChain, TransitionDefinition};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Machine type recorded when none is given.
pub const DEFAULT_MACHINE_TYPE: &str = "StateMachine";

/// Chains a chain-level listener is attached to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainScope<C> {
    /// Every chain of the machine.
    All,
    /// Only the named chains.
    Only(Vec<C>),
}

impl<C: PartialEq> ChainScope<C> {
    /// Whether `chain` is inside this scope.
    pub fn covers(&self, chain: &C) -> bool {
        match self {
            Self::All => true,
            Self::Only(chains) => chains.contains(chain),
        }
    }
}

/// Builder for constructing configurations with a fluent API.
///
/// Chains are only declared here; their parts are resolved from the
/// registered transitions when [`build`](Self::build) runs.
pub struct ConfigurationBuilder<S, E, T, C = NoChain> {
    machine_type: Option<String>,
    transitions: Vec<TransitionDefinition<S, E, T>>,
    chains: Vec<(S, S, C)>,
    chain_listeners: Vec<(ListenerDescriptor<C, T>, ChainScope<C>)>,
}

impl<S: Identifier, E: Identifier, T: 'static, C: Identifier> ConfigurationBuilder<S, E, T, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machine_type: None,
            transitions: Vec::new(),
            chains: Vec::new(),
            chain_listeners: Vec::new(),
        }
    }

    /// Name the machine type this configuration belongs to.
    pub fn machine_type(mut self, name: impl Into<String>) -> Self {
        self.machine_type = Some(name.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E, T>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDefinition<S, E, T>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<TransitionDefinition<S, E, T>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Declare a chain from `from` to `to`, triggered by `on`.
    pub fn chain(mut self, from: S, to: S, on: C) -> Self {
        self.chains.push((from, to, on));
        self
    }

    /// Attach a listener to every chain covered by `scope`.
    pub fn chain_listener(mut self, listener: ListenerDescriptor<C, T>, scope: ChainScope<C>) -> Self {
        self.chain_listeners.push((listener, scope));
        self
    }

    /// Build the configuration.
    ///
    /// Transitions sharing `(from, to, on)` collapse into the first
    /// declaration. Every declared chain is resolved to a shortest path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TransitionChainCreation`] if any chain has no
    /// connecting path; no configuration is produced in that case.
    pub fn build(self) -> Result<Configuration<S, E, T, C>, EngineError> {
        let machine_type = self
            .machine_type
            .unwrap_or_else(|| DEFAULT_MACHINE_TYPE.to_string());

        let mut transitions: Vec<TransitionDefinition<S, E, T>> = Vec::new();
        for transition in self.transitions {
            if !transitions.contains(&transition) {
                transitions.push(transition);
            }
        }

        let mut chains: Vec<ChainDefinition<S, E, T, C>> = Vec::new();
        for (from, to, on) in self.chains {
            let declared = chains
                .iter()
                .any(|c| c.from() == &from && c.to() == &to && c.on() == &on);
            if declared {
                continue;
            }

            let parts = resolve_chain(&transitions, &from, &to, &on)?;
            let mut chain = ChainDefinition::new(from, to, on, parts);
            for (listener, scope) in &self.chain_listeners {
                if scope.covers(chain.on()) {
                    chain.add_listener(listener.clone());
                }
            }
            chains.push(chain);
        }

        let configuration = Configuration::new(machine_type, transitions, chains);

        tracing::debug!(
            machine_type = configuration.machine_type(),
            transitions = configuration.transitions().len(),
            chains = configuration.chains().len(),
            state_type = configuration.state_type(),
            event_type = configuration.event_type(),
            chain_type = configuration.chain_type().unwrap_or("none"),
            "Configuration created"
        );

        Ok(configuration)
    }
}

impl<S: Identifier, E: Identifier, T: 'static, C: Identifier> Default
    for ConfigurationBuilder<S, E, T, C>
{
    fn default() -> Self {
        Self::new()
    }
}
