//! Declarative machine tables.
//!
//! A [`MachineTable`] describes a machine as plain data (states, events and
//! chains by identifier, handlers and listeners by name) so it can be kept in
//! JSON next to the application. Binding a table against a [`Registry`]
//! produces the same [`Configuration`] the fluent builder would.

use super::Configuration;
use crate::builder::{ChainScope, ConfigurationBuilder, TransitionBuilder, NOOP_HANDLER};
use crate::core::{Handler, HandlerError, Identifier, ListenerDescriptor, NoChain};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Version identifier for the table format
pub const TABLE_VERSION: u32 = 1;

/// Serializable description of a machine.
/// Does NOT include handlers or listeners themselves, only their names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineTable<S: Identifier, E: Identifier, C: Identifier = NoChain> {
    /// Table format version
    #[serde(default = "table_version")]
    pub version: u32,

    /// Machine type name; the builder default applies when absent
    #[serde(default)]
    pub machine_type: Option<String>,

    pub transitions: Vec<TransitionRow<S, E>>,

    #[serde(default = "Vec::new")]
    pub chains: Vec<ChainRow<S, C>>,

    #[serde(default = "Vec::new")]
    pub chain_listeners: Vec<ChainListenerRow<C>>,
}

/// One transition of a [`MachineTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRow<S: Identifier, E: Identifier> {
    pub from: S,
    pub to: S,
    pub on: E,

    /// Registered handler name; no handler means the transition only
    /// changes state.
    #[serde(default)]
    pub handler: Option<String>,

    /// Registered listener names, invoked in order.
    #[serde(default)]
    pub listeners: Vec<String>,
}

/// One chain declaration of a [`MachineTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ChainRow<S: Identifier, C: Identifier> {
    pub from: S,
    pub to: S,
    pub on: C,
}

/// A chain listener and the chains it is attached to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ChainListenerRow<C: Identifier> {
    pub listener: String,

    /// Chain names, or `"ALL"` for every chain of the machine.
    #[serde(default = "all_chains")]
    pub chains: Vec<ChainTarget<C>>,
}

/// Wildcard naming every chain in a [`ChainListenerRow`].
pub const ALL_CHAINS: &str = "ALL";

/// One entry of a chain listener's `chains` list.
///
/// A value that isn't a known chain name is kept as text; only
/// [`ALL_CHAINS`] is accepted when the table is bound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged, bound = "")]
pub enum ChainTarget<C: Identifier> {
    Chain(C),
    Wildcard(String),
}

impl<C: Identifier> ChainTarget<C> {
    /// The `"ALL"` wildcard.
    pub fn all() -> Self {
        Self::Wildcard(ALL_CHAINS.to_string())
    }
}

fn table_version() -> u32 {
    TABLE_VERSION
}

fn all_chains<C: Identifier>() -> Vec<ChainTarget<C>> {
    vec![ChainTarget::all()]
}

/// Collapse a `chains` list into the scope the builder attaches with.
fn scope<C: Identifier>(targets: &[ChainTarget<C>]) -> Result<ChainScope<C>, EngineError> {
    let mut chains = Vec::new();

    for target in targets {
        match target {
            ChainTarget::Chain(chain) => chains.push(chain.clone()),
            ChainTarget::Wildcard(name) if name == ALL_CHAINS => return Ok(ChainScope::All),
            ChainTarget::Wildcard(name) => {
                return Err(EngineError::UnexpectedArgument {
                    argument: name.clone(),
                    reason: format!("Neither a chain name nor '{ALL_CHAINS}'"),
                })
            }
        }
    }

    Ok(ChainScope::Only(chains))
}

impl<S: Identifier, E: Identifier, C: Identifier> MachineTable<S, E, C> {
    /// Parse a table from JSON.
    ///
    /// # Errors
    ///
    /// [`EngineError::Table`] for malformed JSON or unknown identifiers,
    /// [`EngineError::UnexpectedArgument`] for an unsupported version.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let table: Self = serde_json::from_str(json)?;

        if table.version != TABLE_VERSION {
            return Err(EngineError::UnexpectedArgument {
                argument: "version".to_string(),
                reason: format!(
                    "Unsupported table version {}, supported: {}",
                    table.version, TABLE_VERSION
                ),
            });
        }

        Ok(table)
    }

    /// Serialize the table to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve every name against `registry` and build the configuration.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnexpectedArgument`] if a handler or listener name
    ///   isn't registered, or a chain listener targets something that is
    ///   neither a chain nor `"ALL"`. The handler name `noop` is always
    ///   available.
    /// - [`EngineError::TransitionChainCreation`] if a chain can't be
    ///   resolved.
    pub fn bind<T: 'static>(
        &self,
        registry: &Registry<S, E, T, C>,
    ) -> Result<Configuration<S, E, T, C>, EngineError> {
        let mut builder = ConfigurationBuilder::new();
        if let Some(machine_type) = &self.machine_type {
            builder = builder.machine_type(machine_type.clone());
        }

        for row in &self.transitions {
            let mut transition = TransitionBuilder::new()
                .from(row.from.clone())
                .to(row.to.clone())
                .on(row.on.clone());

            transition = match row.handler.as_deref() {
                None => transition.succeeds(),
                Some(name) => match registry.handlers.get(name) {
                    Some(handler) => transition.handler_ref(name, Arc::clone(handler)),
                    None if name == NOOP_HANDLER => transition.succeeds(),
                    None => return Err(unregistered("handler", name)),
                },
            };

            for name in &row.listeners {
                let listener = registry
                    .listeners
                    .get(name)
                    .cloned()
                    .ok_or_else(|| unregistered("listener", name))?;
                transition = transition.listener(listener);
            }

            builder = builder.transition(transition)?;
        }

        for row in &self.chains {
            builder = builder.chain(row.from.clone(), row.to.clone(), row.on.clone());
        }

        for row in &self.chain_listeners {
            let listener = registry
                .chain_listeners
                .get(&row.listener)
                .cloned()
                .ok_or_else(|| unregistered("chain listener", &row.listener))?;
            builder = builder.chain_listener(listener, scope(&row.chains)?);
        }

        builder.build()
    }
}

fn unregistered(kind: &str, name: &str) -> EngineError {
    EngineError::UnexpectedArgument {
        argument: name.to_string(),
        reason: format!("No {kind} registered under this name"),
    }
}

/// Named handlers and listeners a [`MachineTable`] can refer to.
pub struct Registry<S, E, T, C = NoChain> {
    handlers: HashMap<String, Handler<S, E, T>>,
    listeners: HashMap<String, ListenerDescriptor<E, T>>,
    chain_listeners: HashMap<String, ListenerDescriptor<C, T>>,
}

impl<S: Identifier, E: Identifier, T: 'static, C: Identifier> Registry<S, E, T, C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            listeners: HashMap::new(),
            chain_listeners: HashMap::new(),
        }
    }

    /// Register an effect handler under `name`. A later registration
    /// replaces an earlier one.
    pub fn handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &S, &E, &mut T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    /// Register a transition listener under `name`.
    pub fn listener(mut self, name: impl Into<String>, listener: ListenerDescriptor<E, T>) -> Self {
        self.listeners.insert(name.into(), listener);
        self
    }

    /// Register a chain listener under `name`.
    pub fn chain_listener(
        mut self,
        name: impl Into<String>,
        listener: ListenerDescriptor<C, T>,
    ) -> Self {
        self.chain_listeners.insert(name.into(), listener);
        self
    }
}

impl<S: Identifier, E: Identifier, T: 'static, C: Identifier> Default for Registry<S, E, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AfterHook, HookError, Listener};
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

    struct Entity {
        value: i32,
    }

    struct Audit;

    impl Listener for Audit {
        fn create() -> Result<Self, HookError> {
            Ok(Audit)
        }
    }

    impl AfterHook<TestEvent, Entity> for Audit {
        fn after(&mut self, _on: &TestEvent, target: &mut Entity) -> Result<(), HookError> {
            target.value *= 10;
            Ok(())
        }
    }

    impl AfterHook<TestChain, Entity> for Audit {
        fn after(&mut self, _on: &TestChain, _target: &mut Entity) -> Result<(), HookError> {
            Ok(())
        }
    }

    const TABLE: &str = r#"{
        "machine_type": "InstallMachine",
        "transitions": [
            {"from": "Available", "to": "Registered", "on": "Register",
             "handler": "increment", "listeners": ["audit"]},
            {"from": "Registered", "to": "Activated", "on": "Activate"}
        ],
        "chains": [
            {"from": "Available", "to": "Activated", "on": "Installing"}
        ],
        "chain_listeners": [
            {"listener": "audit"}
        ]
    }"#;

    fn registry() -> Registry<TestState, TestEvent, Entity, TestChain> {
        Registry::<TestState, TestEvent, Entity, TestChain>::new()
            .handler("increment", |_, _, _, entity: &mut Entity| {
                entity.value += 1;
                Ok(())
            })
            .listener("audit", ListenerDescriptor::after::<Audit>())
            .chain_listener("audit", ListenerDescriptor::after::<Audit>())
    }

    #[test]
    fn table_parses_with_defaults() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(TABLE).unwrap();

        assert_eq!(table.version, TABLE_VERSION);
        assert_eq!(table.transitions.len(), 2);
        assert_eq!(table.transitions[1].handler, None);
        assert!(table.transitions[1].listeners.is_empty());
        assert_eq!(table.chain_listeners[0].chains, vec![ChainTarget::all()]);
    }

    #[test]
    fn bind_resolves_names() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(TABLE).unwrap();

        let configuration = table.bind(&registry()).unwrap();

        assert_eq!(configuration.machine_type(), "InstallMachine");
        let register = &configuration.transitions()[0];
        assert_eq!(register.handler_name(), "increment");
        assert_eq!(register.listeners().len(), 1);
        assert_eq!(configuration.transitions()[1].handler_name(), NOOP_HANDLER);

        let chain = &configuration.chains()[0];
        assert_eq!(chain.parts().len(), 2);
        assert_eq!(chain.listeners().len(), 1);

        let mut entity = Entity { value: 4 };
        register.run_handler(&mut entity).unwrap();
        assert_eq!(entity.value, 5);
    }

    #[test]
    fn unknown_handler_is_rejected() {
        let json = r#"{"transitions": [
            {"from": "Available", "to": "Registered", "on": "Register", "handler": "missing"}
        ]}"#;
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(json).unwrap();

        let result = table.bind(&registry());

        assert!(matches!(
            result,
            Err(EngineError::UnexpectedArgument { ref argument, .. }) if argument == "missing"
        ));
    }

    #[test]
    fn unknown_listener_is_rejected() {
        let json = r#"{"transitions": [
            {"from": "Available", "to": "Registered", "on": "Register", "listeners": ["nobody"]}
        ]}"#;
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(json).unwrap();

        let result = table.bind(&registry());

        assert!(matches!(
            result,
            Err(EngineError::UnexpectedArgument { ref argument, .. }) if argument == "nobody"
        ));
    }

    #[test]
    fn unknown_state_is_a_table_error() {
        let json = r#"{"transitions": [
            {"from": "Limbo", "to": "Registered", "on": "Register"}
        ]}"#;

        let result = MachineTable::<TestState, TestEvent, TestChain>::from_json(json);

        assert!(matches!(result, Err(EngineError::Table(_))));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let json = r#"{"version": 7, "transitions": []}"#;

        let result = MachineTable::<TestState, TestEvent, TestChain>::from_json(json);

        assert!(matches!(
            result,
            Err(EngineError::UnexpectedArgument { ref argument, .. }) if argument == "version"
        ));
    }

    fn chain_listener_table(chains: &str) -> String {
        format!(
            r#"{{
                "transitions": [
                    {{"from": "Available", "to": "Registered", "on": "Register"}},
                    {{"from": "Registered", "to": "Activated", "on": "Activate"}}
                ],
                "chains": [
                    {{"from": "Available", "to": "Activated", "on": "Installing"}}
                ],
                "chain_listeners": [
                    {{"listener": "audit", "chains": {chains}}}
                ]
            }}"#
        )
    }

    #[test]
    fn chain_listener_accepts_wildcard_list() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(&chain_listener_table(r#"["ALL"]"#)).unwrap();

        assert_eq!(table.chain_listeners[0].chains, vec![ChainTarget::all()]);

        let configuration = table.bind(&registry()).unwrap();
        assert_eq!(configuration.chains()[0].listeners().len(), 1);
    }

    #[test]
    fn chain_listener_accepts_chain_names() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(&chain_listener_table(r#"["Installing"]"#)).unwrap();

        assert_eq!(
            table.chain_listeners[0].chains,
            vec![ChainTarget::Chain(TestChain::Installing)]
        );

        let configuration = table.bind(&registry()).unwrap();
        assert_eq!(configuration.chains()[0].listeners().len(), 1);
    }

    #[test]
    fn chain_listener_with_empty_list_attaches_nowhere() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(&chain_listener_table("[]")).unwrap();

        let configuration = table.bind(&registry()).unwrap();

        assert!(configuration.chains()[0].listeners().is_empty());
    }

    #[test]
    fn unknown_chain_target_is_rejected() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(&chain_listener_table(r#"["Uninstalling"]"#)).unwrap();

        let result = table.bind(&registry());

        assert!(matches!(
            result,
            Err(EngineError::UnexpectedArgument { ref argument, .. }) if argument == "Uninstalling"
        ));
    }

    #[test]
    fn table_survives_json() {
        let table: MachineTable<TestState, TestEvent, TestChain> =
            MachineTable::from_json(TABLE).unwrap();

        let json = table.to_json().unwrap();
        let restored = MachineTable::from_json(&json).unwrap();

        assert_eq!(table, restored);
    }
}
