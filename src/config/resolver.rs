//! Chain resolution over the transition graph.
//!
//! States are nodes and every transition is a directed edge `from -> to`.
//! A chain is resolved to a shortest edge sequence between its declared
//! states with a breadth-first search, once, while the configuration is
//! built.

use crate::core::{Identifier, TransitionDefinition};
use crate::error::EngineError;
use std::collections::{HashMap, HashSet, VecDeque};

/// One edge taken by the search, linked to the step it extends.
struct Step {
    edge: usize,
    parent: Option<usize>,
}

/// Find a shortest sequence of transitions leading from `from` to `to`.
///
/// The events of the transitions are irrelevant for the path. When several
/// shortest paths exist, the first one in breadth-first order wins; that
/// order follows the declaration order of `transitions`. Callers should only
/// rely on getting *a* shortest path.
///
/// `from == to` asks for a cycle of at least one transition; an empty path is
/// never returned.
///
/// # Errors
///
/// Returns [`EngineError::TransitionChainCreation`] when `to` is unreachable.
pub fn resolve_chain<S, E, T, C>(
    transitions: &[TransitionDefinition<S, E, T>],
    from: &S,
    to: &S,
    chain: &C,
) -> Result<Vec<TransitionDefinition<S, E, T>>, EngineError>
where
    S: Identifier,
    E: Identifier,
    C: Identifier,
{
    let mut outgoing: HashMap<&S, Vec<usize>> = HashMap::new();
    for (index, transition) in transitions.iter().enumerate() {
        outgoing.entry(transition.from()).or_default().push(index);
    }

    let mut steps: Vec<Step> = Vec::new();
    let mut queue = VecDeque::new();
    let mut expanded: HashSet<&S> = HashSet::new();
    expanded.insert(from);

    for &edge in outgoing.get(from).into_iter().flatten() {
        steps.push(Step { edge, parent: None });
        queue.push_back(steps.len() - 1);
    }

    while let Some(current) = queue.pop_front() {
        let reached = transitions[steps[current].edge].to();

        if reached == to {
            let parts = collect_path(transitions, &steps, current);
            log_chain(chain, from, to, &parts);
            return Ok(parts);
        }

        if !expanded.insert(reached) {
            continue;
        }

        for &edge in outgoing.get(reached).into_iter().flatten() {
            steps.push(Step {
                edge,
                parent: Some(current),
            });
            queue.push_back(steps.len() - 1);
        }
    }

    tracing::trace!(
        chain = chain.name(),
        from = from.name(),
        to = to.name(),
        "There is no transition path available"
    );

    Err(EngineError::TransitionChainCreation {
        from: from.name().to_string(),
        to: to.name().to_string(),
        chain: chain.name().to_string(),
    })
}

fn collect_path<S: Identifier, E: Identifier, T>(
    transitions: &[TransitionDefinition<S, E, T>],
    steps: &[Step],
    last: usize,
) -> Vec<TransitionDefinition<S, E, T>> {
    let mut parts = Vec::new();
    let mut cursor = Some(last);

    while let Some(index) = cursor {
        parts.push(transitions[steps[index].edge].clone());
        cursor = steps[index].parent;
    }

    parts.reverse();
    parts
}

fn log_chain<S: Identifier, E: Identifier, T, C: Identifier>(
    chain: &C,
    from: &S,
    to: &S,
    parts: &[TransitionDefinition<S, E, T>],
) {
    tracing::debug!(
        chain = chain.name(),
        from = from.name(),
        to = to.name(),
        parts = parts.len(),
        "Chain resolved"
    );
    for part in parts {
        tracing::debug!(
            chain = chain.name(),
            on = part.on().name(),
            from = part.from().name(),
            to = part.to().name(),
            "  chain part"
        );
    }
}
