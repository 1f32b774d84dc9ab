use std::collections::BTreeSet;

use itertools::Itertools;

use crate::State;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups elements of type `I` into pairwise disjoint, non-empty classes. It is a
/// different view on an equivalence relation. Two partitions are equal if they consist of the
/// same classes, the order in which the classes are stored is irrelevant.
#[derive(Debug, Clone)]
pub struct Partition<I: State>(Vec<BTreeSet<I>>);

impl<I: State> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: State> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: State> IntoIterator for Partition<I> {
    type Item = BTreeSet<I>;
    type IntoIter = std::vec::IntoIter<BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<I: State> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: State> Eq for Partition<I> {}

impl<I: State> std::fmt::Display for Partition<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let classes = self
            .iter()
            .map(|class| format!("{{{}}}", class.iter().map(|q| format!("{q:?}")).join(", ")))
            .sorted()
            .join(", ");
        write!(f, "{{{classes}}}")
    }
}

impl<I: State> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Collects every inner iterator of `iter` into one class. Classes that come out empty are
    /// not stored, so a caller may pass e.g. an accepting and a rejecting side without checking
    /// either for emptiness. The classes are assumed to be disjoint.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the class that contains `q`, or `None` if `q` is not
    /// an element of any class.
    pub fn class_of(&self, q: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(q))
    }

    /// Returns true if `q` is contained in some class.
    pub fn contains_state(&self, q: &I) -> bool {
        self.class_of(q).is_some()
    }

    /// Returns true if `p` and `q` are both elements and lie in the same class.
    pub fn equivalent(&self, p: &I, q: &I) -> bool {
        matches!((self.class_of(p), self.class_of(q)), (Some(x), Some(y)) if x == y)
    }

    /// Iterates over the union of all classes.
    pub fn states(&self) -> impl Iterator<Item = &I> + '_ {
        self.0.iter().flatten()
    }

    /// Checks whether `self` refines `other`, meaning both cover the same elements and every
    /// class of `self` is contained in some class of `other`.
    pub fn is_refinement_of(&self, other: &Partition<I>) -> bool {
        let own: Set<&I> = self.states().collect();
        let theirs: Set<&I> = other.states().collect();
        own == theirs
            && self.iter().all(|class| {
                other
                    .iter()
                    .any(|coarse| class.iter().all(|q| coarse.contains(q)))
            })
    }

    /// Consumes the partition and returns its classes as a set of sets.
    pub fn into_set(self) -> Set<BTreeSet<I>> {
        self.0.into_iter().collect()
    }
}

/// Takes the classes as they are, only empty ones are dropped.
impl<I: State> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value.into_iter().filter(|c| !c.is_empty()).collect())
    }
}
