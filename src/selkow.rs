use crate::cost::{checked, cheapest};
use crate::{CostModel, EditDistance, IndexedTree, Inspect, Memoized, NodeId};
use itertools::iproduct;
use pathfinding::matrix::Matrix;
use std::collections::HashMap;
use tracing::{debug, debug_span};

/// Selkow's top-down tree edit distance.
///
/// Roots are always relabeled into one another, and whole subtrees are inserted or deleted at
/// once, so the sibling forests of every pair of nodes aligned are matched by a
/// [Levenshtein]-like recursion. Every pair of subtrees ever compared is memoized for the
/// lifetime of the engine.
///
/// Since an inner node cannot be removed without its descendants, the cost is never below the
/// [ZhangShasha][crate::ZhangShasha] distance, and is above it when the cheapest edits remove
/// an inner node on its own. Turning `A(B(C))` into `A(C)` costs 2 here, deleting `B(C)` and
/// inserting `C`, but only 1 for [ZhangShasha][crate::ZhangShasha], which deletes `B` alone.
/// Both agree when every edit preserves the ancestry of the nodes kept, e.g. when only leaves
/// are removed.
///
/// [Levenshtein]: https://en.wikipedia.org/wiki/Levenshtein_distance
#[derive(Debug)]
pub struct Selkow<'t, L, C: CostModel<L>> {
    left: &'t IndexedTree<L>,
    right: &'t IndexedTree<L>,
    costs: C,
    deletions: Memoized<C::Weight>,
    insertions: Memoized<C::Weight>,
    memo: HashMap<(NodeId, NodeId), C::Weight>,
    last: Option<Matrix<C::Weight>>,
}

impl<'t, L, C: CostModel<L>> Selkow<'t, L, C> {
    pub fn new(left: &'t IndexedTree<L>, right: &'t IndexedTree<L>, costs: C) -> Self {
        let deletions = Memoized::new(left, |l| costs.delete(l));
        let insertions = Memoized::new(right, |l| costs.insert(l));

        Selkow {
            left,
            right,
            costs,
            deletions,
            insertions,
            memo: HashMap::new(),
            last: None,
        }
    }

    /// The cost of transforming the left-hand tree into the right-hand one.
    pub fn cost(&mut self) -> C::Weight {
        let (m, n) = (self.left.len(), self.right.len());
        let _span = debug_span!("selkow", left = m, right = n).entered();

        let cost = match (self.left.root(), self.right.root()) {
            (None, None) => C::Weight::default(),
            (None, Some(b)) => self.insertions[b],
            (Some(a), None) => self.deletions[a],
            (Some(a), Some(b)) => self.selkow(a, b),
        };

        debug!(?cost, pairs = self.memo.len(), "Aligned forests");
        cost
    }

    /// The cost of transforming the subtree rooted at `a` into the one rooted at `b`.
    ///
    /// Aligning two nodes requires every pair of their children to be aligned first, so pairs
    /// are resolved bottom-up from an explicit stack rather than through recursion.
    pub fn selkow(&mut self, a: NodeId, b: NodeId) -> C::Weight {
        let (left, right) = (self.left, self.right);
        let mut pending = vec![(a, b)];

        while let Some(&(x, y)) = pending.last() {
            if self.memo.contains_key(&(x, y)) {
                pending.pop();
                continue;
            }

            let missing = pending.len();
            pending.extend(
                iproduct!(left.children(x), right.children(y))
                    .map(|(&i, &j)| (i, j))
                    .filter(|p| !self.memo.contains_key(p)),
            );

            if pending.len() == missing {
                pending.pop();
                let relabel = checked(self.costs.relabel(left.label(x), right.label(y)));
                let cost = relabel + self.forest(x, y);
                self.memo.insert((x, y), cost);
            }
        }

        self.memo[&(a, b)]
    }

    /// Aligns the children of `x` against the children of `y`, assuming every pair of them
    /// has already been memoized.
    fn forest(&mut self, x: NodeId, y: NodeId) -> C::Weight {
        let (f, g) = (self.left.children(x), self.right.children(y));

        let mut dp = Matrix::new(f.len() + 1, g.len() + 1, C::Weight::default());

        for (i, &c) in f.iter().enumerate() {
            dp[(i + 1, 0)] = dp[(i, 0)] + self.deletions[c];
        }

        for (j, &c) in g.iter().enumerate() {
            dp[(0, j + 1)] = dp[(0, j)] + self.insertions[c];
        }

        for (i, &p) in f.iter().enumerate() {
            for (j, &q) in g.iter().enumerate() {
                dp[(i + 1, j + 1)] = cheapest([
                    dp[(i, j + 1)] + self.deletions[p],
                    dp[(i + 1, j)] + self.insertions[q],
                    dp[(i, j)] + self.memo[&(p, q)],
                ]);
            }
        }

        let cost = dp[(f.len(), g.len())];
        self.last = Some(dp);
        cost
    }

    /// The cost model, along with anything it memoized.
    #[inline]
    pub fn costs(&self) -> &C {
        &self.costs
    }
}

impl<'t, L, C: CostModel<L>> EditDistance for Selkow<'t, L, C> {
    type Weight = C::Weight;

    #[inline]
    fn distance(&mut self) -> Self::Weight {
        self.cost()
    }

    fn reset(&mut self) {
        self.memo.clear();
        self.last = None;
        self.costs.clear_cache();
    }
}

impl<'t, L, C: CostModel<L>> Inspect for Selkow<'t, L, C> {
    type Weight = C::Weight;

    /// The number of pairs of subtrees memoized.
    #[inline]
    fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// The forest alignment of the last pair of subtrees compared.
    #[inline]
    fn last_matrix(&self) -> Option<&Matrix<Self::Weight>> {
        self.last.as_ref()
    }
}

/// The [Selkow] distance between two trees.
pub fn selkow_distance<L, C: CostModel<L>>(
    left: &IndexedTree<L>,
    right: &IndexedTree<L>,
    costs: C,
) -> C::Weight {
    Selkow::new(left, right, costs).cost()
}
