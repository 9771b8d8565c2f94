use crate::cost::{checked, cheapest};
use crate::{CostModel, EditDistance, IndexedTree, Inspect, Memoized, UnitCost};
use itertools::iproduct;
use pathfinding::matrix::Matrix;
use tracing::{debug, debug_span, trace};

/// Zhang and Shasha's keyroot decomposition of the tree edit distance.
///
/// Unlike [Selkow][crate::Selkow], inner nodes may be inserted or deleted on their own, their
/// children taking their place among their siblings.
///
/// The tree distance between every pair of subtrees is kept in a `(|T1|+1) × (|T2|+1)` matrix,
/// filled by one forest alignment per pair of keyroots. Both matrices are allocated once, so
/// memory grows with the product of the sizes of the trees.
#[derive(Debug)]
pub struct ZhangShasha<'t, L, C: CostModel<L> = UnitCost> {
    left: &'t IndexedTree<L>,
    right: &'t IndexedTree<L>,
    costs: C,
    tree_dist: Option<Matrix<C::Weight>>,
    written: usize,
}

impl<'t, L: PartialEq> ZhangShasha<'t, L> {
    /// Counts the edits needed, each costing one.
    pub fn new(left: &'t IndexedTree<L>, right: &'t IndexedTree<L>) -> Self {
        Self::with_costs(left, right, UnitCost)
    }
}

impl<'t, L, C: CostModel<L>> ZhangShasha<'t, L, C> {
    pub fn with_costs(left: &'t IndexedTree<L>, right: &'t IndexedTree<L>, costs: C) -> Self {
        ZhangShasha {
            left,
            right,
            costs,
            tree_dist: None,
            written: 0,
        }
    }

    /// The cost of transforming the left-hand tree into the right-hand one.
    ///
    /// The tree distances are computed on the first call and reused afterwards.
    pub fn distance(&mut self) -> C::Weight {
        let (m, n) = (self.left.len(), self.right.len());

        if self.tree_dist.is_none() {
            let _span = debug_span!("zhang_shasha", left = m, right = n).entered();
            let tree_dist = self.compute();
            debug!(cells = self.written, "Computed tree distances");
            self.tree_dist = Some(tree_dist);
        }

        self.tree_dist
            .as_ref()
            .map_or_else(C::Weight::default, |td| td[(m, n)])
    }

    fn compute(&mut self) -> Matrix<C::Weight> {
        let (left, right) = (self.left, self.right);
        let (m, n) = (left.len(), right.len());

        let deletions = Memoized::new(left, |l| self.costs.delete(l));
        let insertions = Memoized::new(right, |l| self.costs.insert(l));

        // Row and column zero hold the cost of deleting or inserting every node up to a
        // post-order index; node `i` maps to row `i + 1`.
        let mut td = Matrix::new(m + 1, n + 1, C::Weight::default());
        for i in left.post_order() {
            td[(i.index() + 1, 0)] = td[(i.index(), 0)] + deletions.node(i);
        }

        for j in right.post_order() {
            td[(0, j.index() + 1)] = td[(0, j.index())] + insertions.node(j);
        }

        // Scratch space for every keyroot pair, only its top-left corner is ever used.
        let mut fd = Matrix::new(m + 1, n + 1, C::Weight::default());

        // Ascending keyroots guarantee the distance between the subtrees rooted at any node
        // other than a keyroot's leftmost path is written before it is read.
        for (&k, &h) in iproduct!(left.keyroots(), right.keyroots()) {
            let (lk, lh) = (left.leftmost_leaf(k).index(), right.leftmost_leaf(h).index());
            trace!(%k, %h, "Aligning keyroots");

            fd[(0, 0)] = C::Weight::default();

            for i in lk..=k.index() {
                let r = i - lk + 1;
                fd[(r, 0)] = fd[(r - 1, 0)] + deletions.node(i.into());
            }

            for j in lh..=h.index() {
                let c = j - lh + 1;
                fd[(0, c)] = fd[(0, c - 1)] + insertions.node(j.into());
            }

            for i in lk..=k.index() {
                let r = i - lk + 1;
                let li = left.leftmost_leaf(i.into()).index();

                for j in lh..=h.index() {
                    let c = j - lh + 1;
                    let lj = right.leftmost_leaf(j.into()).index();

                    let delete = fd[(r - 1, c)] + deletions.node(i.into());
                    let insert = fd[(r, c - 1)] + insertions.node(j.into());

                    if li == lk && lj == lh {
                        let (a, b) = (left.label(i.into()), right.label(j.into()));
                        let relabel = checked(self.costs.relabel(a, b));
                        let cost = cheapest([delete, insert, fd[(r - 1, c - 1)] + relabel]);
                        fd[(r, c)] = cost;
                        td[(i + 1, j + 1)] = cost;
                        self.written += 1;
                    } else {
                        let splice = fd[(li - lk, lj - lh)] + td[(i + 1, j + 1)];
                        fd[(r, c)] = cheapest([delete, insert, splice]);
                    }
                }
            }
        }

        td
    }

    /// The cost model, along with anything it memoized.
    #[inline]
    pub fn costs(&self) -> &C {
        &self.costs
    }
}

impl<'t, L, C: CostModel<L>> EditDistance for ZhangShasha<'t, L, C> {
    type Weight = C::Weight;

    #[inline]
    fn distance(&mut self) -> Self::Weight {
        ZhangShasha::distance(self)
    }

    fn reset(&mut self) {
        self.tree_dist = None;
        self.written = 0;
        self.costs.clear_cache();
    }
}

impl<'t, L, C: CostModel<L>> Inspect for ZhangShasha<'t, L, C> {
    type Weight = C::Weight;

    /// The number of subtree pairs whose tree distance was computed.
    #[inline]
    fn memo_len(&self) -> usize {
        self.written
    }

    /// The tree distance matrix, offset by one in both dimensions.
    #[inline]
    fn last_matrix(&self) -> Option<&Matrix<Self::Weight>> {
        self.tree_dist.as_ref()
    }
}

/// The unit cost [ZhangShasha] distance between two trees.
pub fn zhang_shasha_distance<L: PartialEq>(left: &IndexedTree<L>, right: &IndexedTree<L>) -> u64 {
    ZhangShasha::new(left, right).distance()
}
