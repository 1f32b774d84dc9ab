//! Library for computing the coarsest stable partition of the states of a deterministic finite
//! automaton, which is the central step of DFA minimization.
//!
//! Two states of a DFA are equivalent if they accept precisely the same finite words. The
//! equivalence classes can be computed by partition refinement: we start by separating accepting
//! from non-accepting states and then repeatedly use some block of the current partition as a
//! *splitter*. For each symbol `a`, the states that move into the splitter on `a` are separated
//! from those that do not. Once no block can be split any further, the partition is stable and
//! its blocks are the classes of the equivalence.
//!
//! The crate does not deal with a forward representation of the automaton at all. Instead it
//! consumes an [`InverseTransitions`] relation, which maps a pair of a symbol and a state to the
//! set of states that reach the state on the symbol. The relation implicitly determines the
//! universe of states. The result is a [`math::Partition`].
//!
//! ```
//! use automata_minimize::prelude::*;
//!
//! let inverse: InverseTransitions<char, u32> = [
//!     (('a', 0), vec![0, 1]),
//!     (('a', 1), vec![0, 1]),
//! ]
//! .into_iter()
//! .collect();
//! let accepting: math::Set<u32> = [0, 1].into_iter().collect();
//!
//! let partition = minimize(&accepting, ['a'], &inverse).unwrap();
//! assert_eq!(partition, Partition::new([[0, 1]]));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::{fmt::Debug, hash::Hash};

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_minimize::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "minimize")]
    pub use super::minimization::{
        is_stable, minimize, MinimizationError, Minimizer, WorklistOrder,
    };
    pub use super::{
        inverse::InverseTransitions,
        math,
        math::{Bijection, Partition},
        State, Symbol,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;
pub use math::Partition;

/// Defines the inverse transition relation that the refinement consumes.
pub mod inverse;
pub use inverse::InverseTransitions;

/// Contains the partition refinement algorithm. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;
#[cfg(feature = "minimize")]
pub use minimization::minimize;

/// Implements the generation of random automata, given through their inverse transitions.
#[cfg(feature = "random")]
pub mod random;

/// A state is an opaque identifier, we only need to compare, order and hash it.
pub trait State: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> State for T {}

/// A symbol of the input alphabet. In contrast to a [`State`] it need not be ordered.
pub trait Symbol: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Symbol for T {}
