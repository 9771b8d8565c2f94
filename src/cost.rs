use crate::{levenshtein, Error, IndexedTree, NodeId, Result};
use derive_more::Display;
use std::{collections::HashMap, fmt::Debug, hash::Hash, ops::Add};

/// A non-negative cost.
///
/// The default value of this type is assumed to be the additive identity (i.e. _zero_).
pub trait Weight: Default + Copy + PartialOrd + Add<Output = Self> + Debug {}

impl<W: Default + Copy + PartialOrd + Add<Output = W> + Debug> Weight for W {}

/// Prices the three edit operations.
///
/// Implementations must return non-negative costs and relabeling a label into itself must be
/// free. Neither symmetry nor the triangle inequality are required, but without them the
/// distance is not a metric.
pub trait CostModel<L> {
    type Weight: Weight;

    /// The cost of inserting a single node.
    fn insert(&self, label: &L) -> Self::Weight;

    /// The cost of deleting a single node.
    fn delete(&self, label: &L) -> Self::Weight;

    /// The cost of changing `from` into `to`.
    fn relabel(&mut self, from: &L, to: &L) -> Self::Weight;

    /// Forgets any memoized cost.
    fn clear_cache(&mut self) {}
}

/// The cost of whole subtrees, always the sum of the costs of their nodes.
///
/// Implemented for every [CostModel], so engines and callers agree on what inserting or
/// deleting a subtree costs.
pub trait SubtreeCost<L>: CostModel<L> {
    /// The cost of inserting `node` along with all its descendants.
    fn insert_subtree(&self, tree: &IndexedTree<L>, node: NodeId) -> Self::Weight {
        tree.subtree(node)
            .fold(Self::Weight::default(), |w, n| w + self.insert(tree.label(n)))
    }

    /// The cost of deleting `node` along with all its descendants.
    fn delete_subtree(&self, tree: &IndexedTree<L>, node: NodeId) -> Self::Weight {
        tree.subtree(node)
            .fold(Self::Weight::default(), |w, n| w + self.delete(tree.label(n)))
    }
}

impl<L, C: CostModel<L> + ?Sized> SubtreeCost<L> for C {}

impl<L, C: CostModel<L> + ?Sized> CostModel<L> for &mut C {
    type Weight = C::Weight;

    #[inline]
    fn insert(&self, label: &L) -> Self::Weight {
        C::insert(self, label)
    }

    #[inline]
    fn delete(&self, label: &L) -> Self::Weight {
        C::delete(self, label)
    }

    #[inline]
    fn relabel(&mut self, from: &L, to: &L) -> Self::Weight {
        C::relabel(self, from, to)
    }

    fn clear_cache(&mut self) {
        C::clear_cache(self)
    }
}

/// The returned cost must be non-negative, which also rules out NaN.
#[inline]
pub(crate) fn checked<W: Weight>(w: W) -> W {
    debug_assert!(w >= W::default(), "invalid cost {w:?}");
    w
}

#[inline]
pub(crate) fn cheapest<W: Weight>([mut best, rest @ ..]: [W; 3]) -> W {
    for w in rest {
        if w < best {
            best = w;
        }
    }

    best
}

/// Every insertion and deletion costs one, relabeling costs one unless the labels are equal.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UnitCost;

impl<L: PartialEq> CostModel<L> for UnitCost {
    type Weight = u64;

    #[inline]
    fn insert(&self, _: &L) -> u64 {
        1
    }

    #[inline]
    fn delete(&self, _: &L) -> u64 {
        1
    }

    #[inline]
    fn relabel(&mut self, from: &L, to: &L) -> u64 {
        u64::from(from != to)
    }
}

/// An edit operation.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    #[display(fmt = "insert")]
    Insert,
    #[display(fmt = "delete")]
    Delete,
    #[display(fmt = "relabel")]
    Relabel,
}

/// The basic price of each [Operation].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Prices {
    insert: f64,
    delete: f64,
    relabel: f64,
}

impl Default for Prices {
    fn default() -> Self {
        Prices {
            insert: 1.,
            delete: 1.,
            relabel: 1.,
        }
    }
}

impl Prices {
    /// Fails unless every price is finite and non-negative.
    pub fn new(insert: f64, delete: f64, relabel: f64) -> Result<Self> {
        let prices = Prices {
            insert,
            delete,
            relabel,
        };

        for (operation, value) in [
            (Operation::Insert, insert),
            (Operation::Delete, delete),
            (Operation::Relabel, relabel),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(Error::InvalidCost { operation, value });
            }
        }

        Ok(prices)
    }

    #[inline]
    pub fn insert(&self) -> f64 {
        self.insert
    }

    #[inline]
    pub fn delete(&self) -> f64 {
        self.delete
    }

    #[inline]
    pub fn relabel(&self) -> f64 {
        self.relabel
    }
}

/// Flat insertion and deletion prices, relabeling priced by the [Levenshtein distance] between
/// the labels.
///
/// Relabel costs are memoized per pair of labels until [cleared][CostModel::clear_cache].
///
/// [Levenshtein distance]: https://en.wikipedia.org/wiki/Levenshtein_distance
#[derive(Debug, Clone)]
pub struct LevenshteinCost<L> {
    prices: Prices,
    cache: HashMap<(L, L), f64>,
}

impl<L> Default for LevenshteinCost<L> {
    fn default() -> Self {
        Self::with_prices(Prices::default())
    }
}

impl<L> LevenshteinCost<L> {
    /// Validates the prices before building the model.
    pub fn new(insert: f64, delete: f64, relabel: f64) -> Result<Self> {
        Prices::new(insert, delete, relabel).map(Self::with_prices)
    }

    pub fn with_prices(prices: Prices) -> Self {
        LevenshteinCost {
            prices,
            cache: HashMap::new(),
        }
    }

    #[inline]
    pub fn prices(&self) -> Prices {
        self.prices
    }

    /// The number of memoized relabel costs.
    #[inline]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

impl<L: AsRef<str> + Clone + Eq + Hash> CostModel<L> for LevenshteinCost<L> {
    type Weight = f64;

    #[inline]
    fn insert(&self, _: &L) -> f64 {
        self.prices.insert
    }

    #[inline]
    fn delete(&self, _: &L) -> f64 {
        self.prices.delete
    }

    fn relabel(&mut self, from: &L, to: &L) -> f64 {
        if from == to {
            return 0.;
        }

        let unit = self.prices.relabel;
        *self
            .cache
            .entry((from.clone(), to.clone()))
            .or_insert_with(|| levenshtein(from.as_ref(), to.as_ref()) as f64 * unit)
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
