use tracing::trace;

use crate::{math, State, Symbol};

/// The inverse of a transition function. For a pair consisting of a symbol `a` and a state `q`,
/// it stores the set of states `p` such that reading `a` in `p` leads to `q`.
///
/// The relation implicitly determines the universe of states: a state belongs to the automaton
/// if it is the target component of some key or occurs in one of the predecessor sets. Pairs
/// for which nothing is stored have no predecessors. Predecessors are kept in sets, so inserting
/// the same predecessor twice has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseTransitions<S: Symbol, Q: State> {
    predecessors: math::Map<(S, Q), math::Set<Q>>,
}

impl<S: Symbol, Q: State> Default for InverseTransitions<S, Q> {
    fn default() -> Self {
        Self {
            predecessors: math::Map::default(),
        }
    }
}

impl<S: Symbol, Q: State> InverseTransitions<S, Q> {
    /// Creates an empty relation, its universe is empty as well.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that reading `symbol` in `predecessor` leads to `target`. Returns `true`
    /// if the predecessor was not known before.
    pub fn insert(&mut self, symbol: S, target: Q, predecessor: Q) -> bool {
        self.predecessors
            .entry((symbol, target))
            .or_default()
            .insert(predecessor)
    }

    /// Adds all given predecessors for the pair of `symbol` and `target`. The key is created even if
    /// `predecessors` is empty, which ensures that `target` is part of the universe.
    pub fn extend_predecessors<I: IntoIterator<Item = Q>>(
        &mut self,
        symbol: S,
        target: Q,
        predecessors: I,
    ) {
        self.predecessors
            .entry((symbol, target))
            .or_default()
            .extend(predecessors);
    }

    /// Returns the set of states that reach `target` on `symbol`, or `None` if no such
    /// set is stored.
    pub fn predecessors(&self, symbol: &S, target: &Q) -> Option<&math::Set<Q>> {
        // keys are owned pairs
        self.predecessors.get(&(symbol.clone(), target.clone()))
    }

    /// Computes the set of all states which occur somewhere in the relation.
    pub fn universe(&self) -> math::Set<Q> {
        let mut states = math::Set::default();
        for ((_, target), preds) in &self.predecessors {
            states.insert(target.clone());
            states.extend(preds.iter().cloned());
        }
        trace!("relation with {} keys spans {} states", self.len(), states.len());
        states
    }

    /// Iterates over all stored pairs together with their predecessor sets.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Q, &math::Set<Q>)> + '_ {
        self.predecessors
            .iter()
            .map(|((symbol, target), preds)| (symbol, target, preds))
    }

    /// The number of stored (symbol, state) keys.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Returns true if nothing is stored, in which case the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }
}

impl<S: Symbol, Q: State, I: IntoIterator<Item = Q>> FromIterator<((S, Q), I)>
    for InverseTransitions<S, Q>
{
    fn from_iter<T: IntoIterator<Item = ((S, Q), I)>>(iter: T) -> Self {
        let mut out = Self::new();
        for ((symbol, target), preds) in iter {
            out.extend_predecessors(symbol, target, preds);
        }
        out
    }
}
