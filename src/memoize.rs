use crate::{cost::checked, IndexedTree, NodeId, Weight};
use std::ops::Index;

/// The cost of every node of a tree, alone and along with its descendants.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) struct Memoized<W> {
    node: Box<[W]>,
    subtree: Box<[W]>,
}

impl<W: Weight> Memoized<W> {
    pub(crate) fn new<L, F: FnMut(&L) -> W>(tree: &IndexedTree<L>, mut price: F) -> Self {
        let node: Box<[W]> = tree.post_order().map(|n| checked(price(tree.label(n)))).collect();
        let mut subtree = node.clone();

        // Children precede their parents in post-order.
        for n in tree.post_order() {
            for &c in tree.children(n) {
                subtree[n.index()] = subtree[n.index()] + subtree[c.index()];
            }
        }

        Memoized { node, subtree }
    }

    /// The cost of `n` alone.
    #[inline]
    pub(crate) fn node(&self, n: NodeId) -> W {
        self.node[n.index()]
    }
}

/// The cost of a node and all its descendants.
impl<W> Index<NodeId> for Memoized<W> {
    type Output = W;

    #[inline]
    fn index(&self, n: NodeId) -> &W {
        &self.subtree[n.index()]
    }
}
