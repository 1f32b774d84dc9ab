use itertools::Itertools;
use tracing::debug;

use crate::{math, InverseTransitions};

/// A randomly drawn complete DFA over the states `0..size` and an alphabet of consecutive
/// lowercase letters starting at `'a'`. The forward transitions are kept alongside the inverse
/// relation so that results can be checked against them.
#[derive(Debug, Clone)]
pub struct RandomInstance {
    /// The accepting states.
    pub accepting: math::Set<u32>,
    /// The symbols of the alphabet.
    pub alphabet: Vec<char>,
    /// Maps a symbol and a state to the unique successor.
    pub successors: math::Map<(char, u32), u32>,
    /// The inverse of `successors`.
    pub inverse: InverseTransitions<char, u32>,
    size: u32,
}

impl RandomInstance {
    /// Returns an iterator over all states.
    pub fn states(&self) -> impl Iterator<Item = u32> {
        0..self.size
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.size as usize
    }
}

/// Draws a random [`RandomInstance`] with `size` states and `symbols` symbols using the thread
/// local generator of `fastrand`. See [`random_instance_with_rng`].
pub fn random_instance(size: u32, symbols: usize) -> RandomInstance {
    random_instance_with_rng(&mut fastrand::Rng::new(), size, symbols)
}

/// Draws a random complete DFA as follows:
/// 1. Start with `size` states and no transitions.
/// 2. For each state and each symbol, draw a target state uniformly and add the transition.
/// 3. Each state is accepting with probability one half.
///
/// Every state has an outgoing transition, so all states are part of the universe of the
/// inverse relation.
///
/// # Panics
/// Panics if `symbols` is zero or larger than 26.
pub fn random_instance_with_rng(rng: &mut fastrand::Rng, size: u32, symbols: usize) -> RandomInstance {
    assert!(
        (1..=26).contains(&symbols),
        "need between 1 and 26 symbols, got {symbols}"
    );
    let alphabet = ('a'..='z').take(symbols).collect_vec();

    let mut successors = math::Map::default();
    let mut inverse = InverseTransitions::new();
    for q in 0..size {
        for &sym in &alphabet {
            let target = rng.u32(..size);
            successors.insert((sym, q), target);
            inverse.insert(sym, target, q);
        }
    }
    let accepting = (0..size).filter(|_| rng.bool()).collect();

    debug!("drew random DFA with {size} states over {symbols} symbols");
    RandomInstance {
        accepting,
        alphabet,
        successors,
        inverse,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::{random_instance, random_instance_with_rng};

    #[test_log::test]
    fn random_instance_is_complete() {
        let instance = random_instance(10, 3);
        assert_eq!(instance.size(), 10);
        assert_eq!(instance.successors.len(), 30);
        assert_eq!(instance.inverse.universe().len(), 10);
        assert!(instance.accepting.iter().all(|q| *q < 10));
        for q in instance.states() {
            for a in &instance.alphabet {
                let target = instance.successors[&(*a, q)];
                assert!(instance
                    .inverse
                    .predecessors(a, &target)
                    .is_some_and(|preds| preds.contains(&q)));
            }
        }
    }

    #[test_log::test]
    fn seeded_generation_is_reproducible() {
        let left = random_instance_with_rng(&mut fastrand::Rng::with_seed(7), 8, 2);
        let right = random_instance_with_rng(&mut fastrand::Rng::with_seed(7), 8, 2);
        assert_eq!(left.successors, right.successors);
        assert_eq!(left.accepting, right.accepting);
        assert_eq!(left.inverse, right.inverse);
    }

    #[test]
    #[should_panic]
    fn zero_symbols_panics() {
        random_instance(3, 0);
    }
}
