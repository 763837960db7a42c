//! Run-time execution of transitions and chains.
//!
//! The engine is the imperative shell around an immutable configuration:
//! it looks transitions up, runs handlers and listeners, and commits the
//! target's new state.
//!
//! # Execution order
//!
//! For a single transition:
//! 1. the transition's `before` hooks
//! 2. the effect handler (a failure stops here; state unchanged)
//! 3. the state commit
//! 4. the transition's `after` hooks
//!
//! A chain wraps its parts in the chain listeners' `before` and `after` hooks.

mod machine;

pub use machine::StateMachine;
