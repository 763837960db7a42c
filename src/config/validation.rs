//! Structural checks of a configuration using Validation.
//!
//! Every check runs and all violations are accumulated, so a broken
//! configuration reports everything wrong with it at once.

use super::Configuration;
use crate::core::{ChainDefinition, Identifier};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Structural problems a configuration can have.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("No transitions defined")]
    NoTransitions,

    #[error("Transition '{on}' from {from} to {to} is declared more than once")]
    DuplicateTransition { from: String, to: String, on: String },

    #[error("Chain '{chain}' has no parts")]
    EmptyChain { chain: String },

    #[error("Chain '{chain}' starts at {expected} but its first part leaves {found}")]
    ChainStartMismatch {
        chain: String,
        expected: String,
        found: String,
    },

    #[error("Chain '{chain}' ends at {expected} but its last part enters {found}")]
    ChainEndMismatch {
        chain: String,
        expected: String,
        found: String,
    },

    #[error("Chain '{chain}' is broken after part {index}: {left} doesn't lead to {right}")]
    DisconnectedParts {
        chain: String,
        index: usize,
        left: String,
        right: String,
    },

    #[error("Chain '{chain}' uses unregistered transition '{on}' from {from} to {to}")]
    UnknownPart {
        chain: String,
        from: String,
        to: String,
        on: String,
    },
}

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(condition: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

impl<S: Identifier, E: Identifier, T, C: Identifier> Configuration<S, E, T, C> {
    /// Check every structural invariant, accumulating ALL violations.
    ///
    /// - at least one transition exists
    /// - no two transitions share `(from, to, on)`
    /// - every chain is non-empty, starts at its `from`, ends at its `to`,
    ///   and is made of adjacent registered transitions
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Check> = Vec::new();

        checks.push(require(!self.transitions().is_empty(), || {
            ConfigViolation::NoTransitions
        }));

        for (index, transition) in self.transitions().iter().enumerate() {
            let first = self.transitions().iter().position(|t| t == transition);
            checks.push(require(first == Some(index), || {
                ConfigViolation::DuplicateTransition {
                    from: transition.from().name().to_string(),
                    to: transition.to().name().to_string(),
                    on: transition.on().name().to_string(),
                }
            }));
        }

        for chain in self.chains() {
            checks.extend(self.check_chain(chain));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_chain(&self, chain: &ChainDefinition<S, E, T, C>) -> Vec<Check> {
        let name = chain.on().name();
        let parts = chain.parts();

        let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
            return vec![Validation::fail(ConfigViolation::EmptyChain {
                chain: name.to_string(),
            })];
        };

        let mut checks = vec![
            require(first.from() == chain.from(), || {
                ConfigViolation::ChainStartMismatch {
                    chain: name.to_string(),
                    expected: chain.from().name().to_string(),
                    found: first.from().name().to_string(),
                }
            }),
            require(last.to() == chain.to(), || ConfigViolation::ChainEndMismatch {
                chain: name.to_string(),
                expected: chain.to().name().to_string(),
                found: last.to().name().to_string(),
            }),
        ];

        for (index, pair) in parts.windows(2).enumerate() {
            checks.push(require(pair[0].to() == pair[1].from(), || {
                ConfigViolation::DisconnectedParts {
                    chain: name.to_string(),
                    index,
                    left: pair[0].to().name().to_string(),
                    right: pair[1].from().name().to_string(),
                }
            }));
        }

        for part in parts {
            checks.push(require(self.transitions().contains(part), || {
                ConfigViolation::UnknownPart {
                    chain: name.to_string(),
                    from: part.from().name().to_string(),
                    to: part.to().name().to_string(),
                    on: part.on().name().to_string(),
                }
            }));
        }

        checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{simple_transition, ConfigurationBuilder};
    use crate::core::TransitionDefinition;
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

    type Definition = TransitionDefinition<TestState, TestEvent, Entity>;

    fn register() -> Definition {
        simple_transition(TestState::Available, TestState::Registered, TestEvent::Register)
    }

    fn activate() -> Definition {
        simple_transition(TestState::Registered, TestState::Activated, TestEvent::Activate)
    }

    #[test]
    fn built_configuration_is_valid() {
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            ConfigurationBuilder::new()
                .add_transition(register())
                .add_transition(activate())
                .chain(TestState::Available, TestState::Activated, TestChain::Installing)
                .build()
                .unwrap();

        assert!(matches!(configuration.validate(), Validation::Success(_)));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let broken = ChainDefinition::new(
            TestState::Available,
            TestState::Activated,
            TestChain::Installing,
            vec![activate(), register()],
        );
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            Configuration::new("Broken".to_string(), vec![register(), register()], vec![broken]);

        match configuration.validate() {
            Validation::Failure(errors) => {
                let violations: Vec<&ConfigViolation> = errors.iter().collect();

                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::DuplicateTransition { .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::ChainStartMismatch { .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::ChainEndMismatch { .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::DisconnectedParts { index: 0, .. })));
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, ConfigViolation::UnknownPart { .. })));
                assert_eq!(errors.len(), 5);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn empty_configuration_has_no_transitions() {
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            Configuration::new("Empty".to_string(), Vec::new(), Vec::new());

        if let Validation::Failure(errors) = configuration.validate() {
            assert_eq!(errors.len(), 1);
            assert!(errors.iter().any(|v| *v == ConfigViolation::NoTransitions));
        } else {
            panic!("Expected failure");
        }
    }

    #[test]
    fn empty_chain_is_reported() {
        let empty = ChainDefinition::new(
            TestState::Available,
            TestState::Activated,
            TestChain::Installing,
            Vec::new(),
        );
        let configuration: Configuration<TestState, TestEvent, Entity, TestChain> =
            Configuration::new("Empty".to_string(), vec![register()], vec![empty]);

        if let Validation::Failure(errors) = configuration.validate() {
            assert!(errors
                .iter()
                .any(|v| matches!(v, ConfigViolation::EmptyChain { chain } if chain == "Installing")));
        } else {
            panic!("Expected failure");
        }
    }
}
