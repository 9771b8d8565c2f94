use crate::{Error, Result, Tree};
use derive_more::{Display, From};
use std::collections::{hash_map::Entry, HashMap};
use std::iter::successors;
use tracing::debug;

/// The post-order position of a node within an [IndexedTree].
///
/// Ids are dense: the nodes of a tree of size `n` are numbered `0..n`, children before their
/// parent, so the root is always the last one.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
pub struct NodeId(usize);

impl NodeId {
    /// The post-order index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// An immutable ordered tree, stored as an arena in post-order.
///
/// All derived attributes (leftmost leaves, keyroots, depths) are computed once on
/// construction. The tree may be empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IndexedTree<L> {
    labels: Box<[L]>,
    children: Box<[Box<[NodeId]>]>,
    parents: Box<[Option<NodeId>]>,
    leftmost: Box<[NodeId]>,
    depths: Box<[usize]>,
    keyroots: Box<[NodeId]>,
}

impl<L> Default for IndexedTree<L> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Walks a tree in post-order without recursing, returning the visited nodes and the ids of
/// each node's children.
///
/// Nodes are told apart by `key`. Reaching a node twice fails, with [Error::CyclicNode] if it
/// is still being visited and [Error::SharedNode] otherwise.
pub(crate) fn walk<N, K, I, F>(
    root: N,
    mut key: K,
    mut children: F,
) -> Result<(Vec<N>, Vec<Box<[NodeId]>>)>
where
    N: Copy,
    K: FnMut(N) -> usize,
    I: Iterator<Item = N>,
    F: FnMut(N) -> I,
{
    // Pre-order position of every node reached, and whether it is still on the stack.
    let mut reached = HashMap::from([(key(root), (0, true))]);

    let mut order = Vec::new();
    let mut kids: Vec<Box<[NodeId]>> = Vec::new();
    let mut stack = vec![(root, children(root), Vec::new())];

    loop {
        let next = match stack.last_mut() {
            Some((_, pending, _)) => pending.next(),
            None => break,
        };

        if let Some(child) = next {
            let position = reached.len();
            match reached.entry(key(child)) {
                Entry::Occupied(e) => {
                    return Err(match *e.get() {
                        (first, true) => Error::CyclicNode(first),
                        (first, false) => Error::SharedNode(first),
                    });
                }
                Entry::Vacant(e) => e.insert((position, true)),
            };

            stack.push((child, children(child), Vec::new()));
        } else if let Some((node, _, done)) = stack.pop() {
            if let Some(state) = reached.get_mut(&key(node)) {
                state.1 = false;
            }

            let id = NodeId(order.len());
            order.push(node);
            kids.push(done.into());
            if let Some((_, _, siblings)) = stack.last_mut() {
                siblings.push(id);
            }
        }
    }

    Ok((order, kids))
}

impl<L> IndexedTree<L> {
    /// Indexes any [Tree].
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a tree, see [IndexedTree::try_new].
    pub fn new<'t, T: Tree<'t, Label = L>>(root: &'t T) -> Self {
        Self::try_new(root).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Indexes any [Tree], failing if some node is reachable from `root` more than once.
    ///
    /// Nodes are told apart by their address, so this guards [Tree] implementations backed by
    /// arenas or shared references against cycles and shared children.
    pub fn try_new<'t, T: Tree<'t, Label = L>>(root: &'t T) -> Result<Self> {
        let address = |n: &'t T| n as *const T as usize;
        let (order, children) = walk(root, address, |n| n.children().into_iter())?;
        Ok(Self::from_post_order(order.into_iter().map(|n| n.label()).collect(), children))
    }

    /// The tree without any nodes.
    pub fn empty() -> Self {
        Self::from_post_order(Vec::new(), Vec::new())
    }

    pub(crate) fn from_post_order(labels: Vec<L>, children: Vec<Box<[NodeId]>>) -> Self {
        debug_assert_eq!(labels.len(), children.len());
        let n = labels.len();

        let mut parents = vec![None; n];
        for (p, cs) in children.iter().enumerate() {
            for c in cs.iter() {
                debug_assert!(c.0 < p, "child {c} does not precede its parent {p}");
                parents[c.0] = Some(NodeId(p));
            }
        }

        // Children precede their parent, so a single ascending pass suffices.
        let mut leftmost = Vec::with_capacity(n);
        for (i, cs) in children.iter().enumerate() {
            let li = cs.first().map_or(NodeId(i), |c| leftmost[c.0]);
            leftmost.push(li);
        }

        let mut depths = vec![0; n];
        for i in (0..n).rev() {
            if let Some(p) = parents[i] {
                depths[i] = depths[p.0] + 1;
            }
        }

        let keyroots: Box<[NodeId]> = (0..n)
            .filter(|&i| parents[i].map_or(true, |p| leftmost[p.0] != leftmost[i]))
            .map(NodeId)
            .collect();

        debug!(size = n, keyroots = keyroots.len(), "Indexed tree");

        IndexedTree {
            labels: labels.into(),
            children: children.into(),
            parents: parents.into(),
            leftmost: leftmost.into(),
            depths: depths.into(),
            keyroots,
        }
    }

    /// The number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The root, unless the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.len().checked_sub(1).map(NodeId)
    }

    /// Every node in post-order, root last.
    pub fn post_order(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
        (0..self.len()).map(NodeId)
    }

    #[inline]
    pub fn label(&self, node: NodeId) -> &L {
        &self.labels[node.0]
    }

    /// The node's children, in order.
    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.children[node.0]
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents[node.0]
    }

    /// The leftmost leaf of the node's subtree, which is the node itself for leaves.
    #[inline]
    pub fn leftmost_leaf(&self, node: NodeId) -> NodeId {
        self.leftmost[node.0]
    }

    /// The root together with every node whose leftmost leaf differs from its parent's,
    /// ascending by post-order index.
    #[inline]
    pub fn keyroots(&self) -> &[NodeId] {
        &self.keyroots
    }

    /// The number of edges between the root and the node.
    #[inline]
    pub fn depth(&self, node: NodeId) -> usize {
        self.depths[node.0]
    }

    /// The depth of the deepest node, if any.
    pub fn height(&self) -> Option<usize> {
        self.depths.iter().copied().max()
    }

    /// The number of nodes in the subtree rooted at `node`, itself included.
    #[inline]
    pub fn subtree_size(&self, node: NodeId) -> usize {
        node.0 - self.leftmost[node.0].0 + 1
    }

    /// Every node of the subtree rooted at `node` in post-order.
    ///
    /// Subtrees occupy the contiguous range between their leftmost leaf and their root.
    pub fn subtree(&self, node: NodeId) -> impl DoubleEndedIterator<Item = NodeId> {
        (self.leftmost[node.0].0..=node.0).map(NodeId)
    }

    /// The proper ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Whether `ancestor` is a proper ancestor of `node`.
    #[inline]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.leftmost[ancestor.0] <= node && node < ancestor
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.children[node.0].is_empty()
    }

    /// Every leaf, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.post_order().filter(move |&n| self.is_leaf(n))
    }

    /// The first node in post-order carrying `label`.
    pub fn find(&self, label: &L) -> Option<NodeId>
    where
        L: PartialEq,
    {
        self.labels.iter().position(|l| l == label).map(NodeId)
    }
}
