//! Before/after observers of transitions and chains.
//!
//! A listener type opts into the hooks it supports by implementing
//! [`BeforeHook`] and/or [`AfterHook`]. Which hooks exist is decided when the
//! [`ListenerDescriptor`] is created, so dispatch never looks for a hook the
//! type doesn't provide.

use crate::error::{EngineError, HookError};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// Construction of a fresh listener instance.
///
/// A new instance is created for every hook invocation; listeners keep no
/// state between calls.
pub trait Listener: Sized + 'static {
    fn create() -> Result<Self, HookError>;
}

/// Hook run before a transition's handler, or before a chain's first part.
pub trait BeforeHook<I, T> {
    fn before(&mut self, on: &I, target: &mut T) -> Result<(), HookError>;
}

/// Hook run after a transition committed, or after a chain's last part.
pub trait AfterHook<I, T> {
    fn after(&mut self, on: &I, target: &mut T) -> Result<(), HookError>;
}

/// Phase in which a listener is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    Before,
    After,
}

impl Hook {
    /// Lower-case phase name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type HookFn<I, T> = Arc<dyn Fn(&I, &mut T) -> Result<(), HookError> + Send + Sync>;

/// Describes a listener type and the hooks it defines.
///
/// `I` is the identifier passed to the hooks: the event for transition
/// listeners, the chain name for chain listeners.
///
/// # Example
///
/// ```rust
/// use machina::core::{BeforeHook, HookError, Listener, ListenerDescriptor};
///
/// struct Audit;
///
/// impl Listener for Audit {
///     fn create() -> Result<Self, HookError> {
///         Ok(Audit)
///     }
/// }
///
/// impl BeforeHook<u8, Vec<u8>> for Audit {
///     fn before(&mut self, on: &u8, target: &mut Vec<u8>) -> Result<(), HookError> {
///         target.push(*on);
///         Ok(())
///     }
/// }
///
/// let descriptor = ListenerDescriptor::<u8, Vec<u8>>::before::<Audit>();
/// assert!(descriptor.has_before());
/// assert!(!descriptor.has_after());
/// ```
pub struct ListenerDescriptor<I, T> {
    listener_type: &'static str,
    before: Option<HookFn<I, T>>,
    after: Option<HookFn<I, T>>,
}

impl<I: 'static, T: 'static> ListenerDescriptor<I, T> {
    /// Descriptor for a listener that only observes the "before" phase.
    pub fn before<L>() -> Self
    where
        L: Listener + BeforeHook<I, T>,
    {
        Self {
            listener_type: type_name::<L>(),
            before: Some(before_hook::<L, I, T>()),
            after: None,
        }
    }

    /// Descriptor for a listener that only observes the "after" phase.
    pub fn after<L>() -> Self
    where
        L: Listener + AfterHook<I, T>,
    {
        Self {
            listener_type: type_name::<L>(),
            before: None,
            after: Some(after_hook::<L, I, T>()),
        }
    }

    /// Descriptor for a listener observing both phases.
    pub fn both<L>() -> Self
    where
        L: Listener + BeforeHook<I, T> + AfterHook<I, T>,
    {
        Self {
            listener_type: type_name::<L>(),
            before: Some(before_hook::<L, I, T>()),
            after: Some(after_hook::<L, I, T>()),
        }
    }
}

impl<I, T> ListenerDescriptor<I, T> {
    /// Type name of the listener.
    pub fn listener_type(&self) -> &'static str {
        self.listener_type
    }

    /// Whether the listener observes the "before" phase.
    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    /// Whether the listener observes the "after" phase.
    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }

    fn hook(&self, hook: Hook) -> Option<&HookFn<I, T>> {
        match hook {
            Hook::Before => self.before.as_ref(),
            Hook::After => self.after.as_ref(),
        }
    }

    /// Invoke one hook on a fresh listener instance. Absent hooks are skipped.
    pub(crate) fn invoke(&self, hook: Hook, on: &I, target: &mut T) -> Result<(), EngineError> {
        let Some(callable) = self.hook(hook) else {
            return Ok(());
        };

        callable(on, target).map_err(|cause| {
            tracing::error!(
                listener = self.listener_type,
                hook = %hook,
                error = %cause,
                "Couldn't call listener hook"
            );
            EngineError::InvalidTransitionListener {
                listener_type: self.listener_type.to_string(),
                hook,
                cause,
            }
        })
    }
}

/// Run `hook` on every listener in order, stopping at the first failure.
pub(crate) fn dispatch<I, T>(
    listeners: &[ListenerDescriptor<I, T>],
    hook: Hook,
    on: &I,
    target: &mut T,
) -> Result<(), EngineError> {
    listeners
        .iter()
        .try_for_each(|listener| listener.invoke(hook, on, target))
}

fn before_hook<L, I, T>() -> HookFn<I, T>
where
    L: Listener + BeforeHook<I, T>,
    I: 'static,
    T: 'static,
{
    Arc::new(|on: &I, target: &mut T| -> Result<(), HookError> {
        let mut listener = L::create()?;
        listener.before(on, target)
    })
}

fn after_hook<L, I, T>() -> HookFn<I, T>
where
    L: Listener + AfterHook<I, T>,
    I: 'static,
    T: 'static,
{
    Arc::new(|on: &I, target: &mut T| -> Result<(), HookError> {
        let mut listener = L::create()?;
        listener.after(on, target)
    })
}

impl<I, T> Clone for ListenerDescriptor<I, T> {
    fn clone(&self) -> Self {
        Self {
            listener_type: self.listener_type,
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<I, T> fmt::Debug for ListenerDescriptor<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerDescriptor")
            .field("listener_type", &self.listener_type)
            .field("has_before", &self.has_before())
            .field("has_after", &self.has_after())
            .finish()
    }
}
