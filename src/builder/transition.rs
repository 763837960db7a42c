//! Builder for constructing transition definitions.

use crate::builder::error::BuildError;
use crate::core::{Handler, HandlerError, Identifier, ListenerDescriptor, TransitionDefinition};
use std::sync::Arc;

/// Name recorded for transitions built with [`TransitionBuilder::succeeds`].
pub const NOOP_HANDLER: &str = "noop";

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S, E, T> {
    from: Option<S>,
    to: Option<S>,
    on: Option<E>,
    handler: Option<(String, Handler<S, E, T>)>,
    listeners: Vec<ListenerDescriptor<E, T>>,
}

impl<S: Identifier, E: Identifier, T: 'static> TransitionBuilder<S, E, T> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            on: None,
            handler: None,
            listeners: Vec::new(),
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.on = Some(event);
        self
    }

    /// Set the effect handler (required).
    pub fn handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &S, &E, &mut T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handler = Some((name.into(), Arc::new(handler)));
        self
    }

    /// Set an already shared effect handler.
    pub fn handler_ref(mut self, name: impl Into<String>, handler: Handler<S, E, T>) -> Self {
        self.handler = Some((name.into(), handler));
        self
    }

    /// Use a handler that does nothing; only the state changes.
    pub fn succeeds(self) -> Self {
        self.handler(NOOP_HANDLER, |_: &S, _: &S, _: &E, _: &mut T| Ok(()))
    }

    /// Attach a listener (optional, repeatable).
    pub fn listener(mut self, listener: ListenerDescriptor<E, T>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Attach several listeners at once.
    pub fn listeners(mut self, listeners: Vec<ListenerDescriptor<E, T>>) -> Self {
        self.listeners.extend(listeners);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDefinition<S, E, T>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let on = self.on.ok_or(BuildError::MissingEvent)?;
        let (handler_name, handler) = self.handler.ok_or(BuildError::MissingHandler)?;

        Ok(TransitionDefinition::new(
            from,
            to,
            on,
            handler_name,
            handler,
            self.listeners,
        ))
    }
}

impl<S: Identifier, E: Identifier, T: 'static> Default for TransitionBuilder<S, E, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BeforeHook, HookError, Listener};
    use crate::identifier_enum;

    identifier_enum! {
        enum TestState {
            Available,
            Registered,
        }
    }

    identifier_enum! {
        enum TestEvent {
            Register,
        }
    }

    struct Entity {
        value: i32,
    }

    struct Tracker;

    impl Listener for Tracker {
        fn create() -> Result<Self, HookError> {
            Ok(Tracker)
        }
    }

    impl BeforeHook<TestEvent, Entity> for Tracker {
        fn before(&mut self, _on: &TestEvent, target: &mut Entity) -> Result<(), HookError> {
            target.value += 10;
            Ok(())
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<TestState, TestEvent, Entity>::new()
            .from(TestState::Available)
            .build();

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn builder_validates_missing_event() {
        let result = TransitionBuilder::<TestState, TestEvent, Entity>::new()
            .from(TestState::Available)
            .to(TestState::Registered)
            .succeeds()
            .build();

        assert!(matches!(result, Err(BuildError::MissingEvent)));
    }

    #[test]
    fn builder_validates_missing_handler() {
        let result = TransitionBuilder::<TestState, TestEvent, Entity>::new()
            .from(TestState::Available)
            .to(TestState::Registered)
            .on(TestEvent::Register)
            .build();

        assert!(matches!(result, Err(BuildError::MissingHandler)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new()
            .from(TestState::Available)
            .to(TestState::Registered)
            .on(TestEvent::Register)
            .handler("register", |_, _, _, entity: &mut Entity| {
                entity.value += 1;
                Ok(())
            })
            .listener(ListenerDescriptor::before::<Tracker>())
            .build()
            .unwrap();

        assert_eq!(transition.from(), &TestState::Available);
        assert_eq!(transition.to(), &TestState::Registered);
        assert_eq!(transition.on(), &TestEvent::Register);
        assert_eq!(transition.handler_name(), "register");
        assert_eq!(transition.listeners().len(), 1);

        let mut entity = Entity { value: 0 };
        transition.run_handler(&mut entity).unwrap();
        assert_eq!(entity.value, 1);
    }

    #[test]
    fn succeeds_uses_noop_handler() {
        let transition = TransitionBuilder::<TestState, TestEvent, Entity>::new()
            .from(TestState::Available)
            .to(TestState::Registered)
            .on(TestEvent::Register)
            .succeeds()
            .build()
            .unwrap();

        let mut entity = Entity { value: 7 };
        transition.run_handler(&mut entity).unwrap();

        assert_eq!(transition.handler_name(), NOOP_HANDLER);
        assert_eq!(entity.value, 7);
    }
}
