pub(crate) mod partition_refinement;

use bit_set::BitSet;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    math::{self, Bijection, Partition},
    InverseTransitions, State, Symbol,
};

use partition_refinement::{PredecessorTable, Refinement};

/// Errors that can be raised before the refinement starts. The refinement itself
/// cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MinimizationError<Q> {
    /// An accepting state does not occur anywhere in the inverse transition relation, so
    /// it is not part of the automaton.
    #[error("accepting state {state:?} does not occur in the inverse transition relation")]
    InvalidInput {
        /// The offending state.
        state: Q,
    },
}

/// Determines in which order splitters are taken from the worklist. For a complete automaton,
/// where every state has a transition on every symbol, the resulting partition does not depend
/// on it, only the amount of work done on the way does. If transitions are missing, different
/// orders may produce different partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorklistOrder {
    /// Take the most recently added block first.
    #[default]
    Lifo,
    /// Take the block that has been waiting longest first.
    Fifo,
}

/// Configures a run of the partition refinement. The default configuration rejects accepting
/// states which are not part of the automaton and processes the worklist in [`WorklistOrder::Lifo`]
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Minimizer {
    order: WorklistOrder,
    lenient: bool,
}

impl Minimizer {
    /// Creates a minimizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order in which splitters are removed from the worklist. This only affects the
    /// result if the inverse relation is not complete, see [`WorklistOrder`].
    pub fn with_order(self, order: WorklistOrder) -> Self {
        Self { order, ..self }
    }

    /// Accepting states which do not occur in the inverse relation are dropped with a warning
    /// instead of causing a [`MinimizationError::InvalidInput`].
    pub fn lenient(self) -> Self {
        Self {
            lenient: true,
            ..self
        }
    }

    /// Returns the configured worklist order.
    pub fn order(&self) -> WorklistOrder {
        self.order
    }

    /// Computes the coarsest partition of the states of the automaton given by `inverse` which
    /// separates `accepting` from the remaining states and is stable with respect to every
    /// symbol of `alphabet`. Two states end up in the same block if and only if no word over
    /// `alphabet` distinguishes them.
    ///
    /// The set of states is the universe of `inverse`, see [`InverseTransitions::universe`].
    /// Symbols of `inverse` which are not in `alphabet` only contribute to that universe. With an
    /// empty alphabet, the initial split into accepting and non-accepting states is returned.
    ///
    /// # Errors
    /// Fails with [`MinimizationError::InvalidInput`] if some accepting state does not belong to
    /// the universe, unless the minimizer is [`Minimizer::lenient`].
    pub fn minimize<S, Q, I>(
        &self,
        accepting: &math::Set<Q>,
        alphabet: I,
        inverse: &InverseTransitions<S, Q>,
    ) -> Result<Partition<Q>, MinimizationError<Q>>
    where
        S: Symbol,
        Q: State,
        I: IntoIterator<Item = S>,
    {
        let universe = inverse.universe();

        let foreign = accepting
            .iter()
            .filter(|q| !universe.contains(*q))
            .sorted()
            .collect_vec();
        if let Some(state) = foreign.first() {
            if !self.lenient {
                return Err(MinimizationError::InvalidInput {
                    state: Q::clone(state),
                });
            }
            warn!(
                "ignoring {} accepting states that are not part of the automaton: {:?}",
                foreign.len(),
                foreign
            );
        }

        // states are numbered in ascending order
        let states: Bijection<usize, Q> = universe.into_iter().sorted().enumerate().collect();
        let symbols: math::Map<S, usize> = alphabet
            .into_iter()
            .unique()
            .enumerate()
            .map(|(i, sym)| (sym, i))
            .collect();
        debug!(
            "refining partition of {} states over {} symbols",
            states.len(),
            symbols.len()
        );

        let mut predecessors: PredecessorTable =
            vec![vec![Vec::new(); states.len()]; symbols.len()];
        for (symbol, target, preds) in inverse.iter() {
            let (Some(&sym), Some(&target)) = (symbols.get(symbol), states.get_by_right(target))
            else {
                continue;
            };
            predecessors[sym][target] = preds
                .iter()
                .filter_map(|p| states.get_by_right(p).copied())
                .collect();
        }

        let (accepting_ids, rejecting_ids): (BitSet, BitSet) = states
            .iter()
            .map(|(&id, q)| (id, accepting.contains(q)))
            .partition_map(|(id, acc)| {
                if acc {
                    itertools::Either::Left(id)
                } else {
                    itertools::Either::Right(id)
                }
            });

        let mut refinement =
            Refinement::new(states.len(), accepting_ids, rejecting_ids, self.order);
        refinement.run(&predecessors);

        Ok(Partition::new(refinement.into_blocks().into_iter().map(|block| {
            block
                .iter()
                .filter_map(|id| states.get_by_left(&id).cloned())
                .collect_vec()
        })))
    }
}

/// Computes the coarsest stable partition of the states of `inverse` that separates `accepting`
/// from the remaining states, using the default [`Minimizer`]. See [`Minimizer::minimize`] for
/// details.
pub fn minimize<S, Q, I>(
    accepting: &math::Set<Q>,
    alphabet: I,
    inverse: &InverseTransitions<S, Q>,
) -> Result<Partition<Q>, MinimizationError<Q>>
where
    S: Symbol,
    Q: State,
    I: IntoIterator<Item = S>,
{
    Minimizer::default().minimize(accepting, alphabet, inverse)
}

/// Checks whether `partition` is stable, i.e. for every symbol of `alphabet` and every pair of
/// blocks `A`, `Y`, either all or none of the states in `Y` reach `A` on that symbol.
///
/// For a complete automaton, the result of [`minimize`] is always stable. With missing
/// transitions that need not be the case, as a state without a transition on some symbol is
/// never put into the worklist's predecessor sets for it.
pub fn is_stable<S, Q, I>(
    partition: &Partition<Q>,
    alphabet: I,
    inverse: &InverseTransitions<S, Q>,
) -> bool
where
    S: Symbol,
    Q: State,
    I: IntoIterator<Item = S>,
{
    alphabet.into_iter().unique().all(|symbol| {
        partition.iter().all(|splitter| {
            let reaching: math::Set<&Q> = splitter
                .iter()
                .filter_map(|q| inverse.predecessors(&symbol, q))
                .flatten()
                .collect();
            partition.iter().all(|block| {
                let inside = block.iter().filter(|q| reaching.contains(q)).count();
                inside == 0 || inside == block.len()
            })
        })
    })
}
