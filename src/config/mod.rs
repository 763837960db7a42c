//! Machine configurations.
//!
//! A [`Configuration`] holds every transition and resolved chain of one
//! machine type. It is assembled once (by a `ConfigurationBuilder` or from a
//! `MachineTable`), then shared read-only by any number of machines and
//! threads.

pub mod resolver;
pub mod table;
pub mod validation;

pub use resolver::resolve_chain;
pub use table::{ChainTarget, MachineTable, Registry, ALL_CHAINS};
pub use validation::ConfigViolation;

use crate::core::{ChainDefinition, Identifier, NoChain, TransitionDefinition};
use std::any::{type_name, TypeId};

/// Immutable set of all transitions and chains of one machine type.
pub struct Configuration<S, E, T, C = NoChain> {
    machine_type: String,
    transitions: Vec<TransitionDefinition<S, E, T>>,
    chains: Vec<ChainDefinition<S, E, T, C>>,
}

impl<S: Identifier, E: Identifier, T, C: Identifier> Configuration<S, E, T, C> {
    pub(crate) fn new(
        machine_type: String,
        transitions: Vec<TransitionDefinition<S, E, T>>,
        chains: Vec<ChainDefinition<S, E, T, C>>,
    ) -> Self {
        Self {
            machine_type,
            transitions,
            chains,
        }
    }

    /// Name of the machine type this configuration belongs to.
    pub fn machine_type(&self) -> &str {
        &self.machine_type
    }

    /// Type name of the state identifiers.
    pub fn state_type(&self) -> &'static str {
        type_name::<S>()
    }

    /// Type name of the event identifiers.
    pub fn event_type(&self) -> &'static str {
        type_name::<E>()
    }

    /// Chain type of the machine, or `None` when it declares no chain type.
    pub fn chain_type(&self) -> Option<&'static str> {
        if TypeId::of::<C>() == TypeId::of::<NoChain>() {
            None
        } else {
            Some(type_name::<C>())
        }
    }

    /// All transitions, deduplicated, in declaration order.
    pub fn transitions(&self) -> &[TransitionDefinition<S, E, T>] {
        &self.transitions
    }

    /// All resolved chains, in declaration order.
    pub fn chains(&self) -> &[ChainDefinition<S, E, T, C>] {
        &self.chains
    }

    /// First transition declared for `event` leaving `state`.
    pub fn find_transition(&self, event: &E, state: &S) -> Option<&TransitionDefinition<S, E, T>> {
        self.transitions.iter().find(|t| t.matches(event, state))
    }

    /// First chain declared as `chain` starting at `state`.
    pub fn find_chain(&self, chain: &C, state: &S) -> Option<&ChainDefinition<S, E, T, C>> {
        self.chains.iter().find(|c| c.matches(chain, state))
    }
}

impl<S: Clone, E: Clone, T, C: Clone> Clone for Configuration<S, E, T, C> {
    fn clone(&self) -> Self {
        Self {
            machine_type: self.machine_type.clone(),
            transitions: self.transitions.clone(),
            chains: self.chains.clone(),
        }
    }
}

impl<S: std::fmt::Debug, E: std::fmt::Debug, T, C: std::fmt::Debug> std::fmt::Debug
    for Configuration<S, E, T, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("machine_type", &self.machine_type)
            .field("transitions", &self.transitions)
            .field("chains", &self.chains)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{simple_transition, ConfigurationBuilder};
    use crate::identifier_enum;

    identifier_enum! {
        enum TestState {
            Available,
            Registered,
            Activated,
        }
    }

    identifier_enum! {
        enum TestEvent {
            Register,
            Activate,
        }
    }

    identifier_enum! {
        enum TestChain {
            Installing,
        }
    }

    struct Entity;

    #[test]
    fn type_descriptors_name_identifier_types() {
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            ConfigurationBuilder::new()
                .machine_type("InstallMachine")
                .add_transition(simple_transition(
                    TestState::Available,
                    TestState::Registered,
                    TestEvent::Register,
                ))
                .build()
                .unwrap();

        assert_eq!(configuration.machine_type(), "InstallMachine");
        assert!(configuration.state_type().ends_with("TestState"));
        assert!(configuration.event_type().ends_with("TestEvent"));
        assert!(configuration.chain_type().unwrap().ends_with("TestChain"));
    }

    #[test]
    fn machines_without_chains_report_no_chain_type() {
        let configuration: Configuration<TestState, TestEvent, Entity> = ConfigurationBuilder::new()
            .add_transition(simple_transition(
                TestState::Available,
                TestState::Registered,
                TestEvent::Register,
            ))
            .build()
            .unwrap();

        assert_eq!(configuration.chain_type(), None);
        assert!(configuration.chains().is_empty());
    }

    #[test]
    fn find_transition_matches_on_from_only() {
        let configuration: Configuration<TestState, TestEvent, Entity> = ConfigurationBuilder::new()
            .add_transition(simple_transition(
                TestState::Available,
                TestState::Registered,
                TestEvent::Register,
            ))
            .add_transition(simple_transition(
                TestState::Registered,
                TestState::Activated,
                TestEvent::Activate,
            ))
            .build()
            .unwrap();

        let found = configuration
            .find_transition(&TestEvent::Activate, &TestState::Registered)
            .unwrap();
        assert_eq!(found.to(), &TestState::Activated);

        // A target already in the `to` state does not match.
        assert!(configuration
            .find_transition(&TestEvent::Activate, &TestState::Activated)
            .is_none());
        assert!(configuration
            .find_transition(&TestEvent::Activate, &TestState::Available)
            .is_none());
    }

    #[test]
    fn find_chain_matches_on_name_and_start() {
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            ConfigurationBuilder::new()
                .add_transition(simple_transition(
                    TestState::Available,
                    TestState::Registered,
                    TestEvent::Register,
                ))
                .add_transition(simple_transition(
                    TestState::Registered,
                    TestState::Activated,
                    TestEvent::Activate,
                ))
                .chain(TestState::Available, TestState::Activated, TestChain::Installing)
                .build()
                .unwrap();

        assert!(configuration
            .find_chain(&TestChain::Installing, &TestState::Available)
            .is_some());
        assert!(configuration
            .find_chain(&TestChain::Installing, &TestState::Registered)
            .is_none());
    }
}
