//! An arena builder for trees whose shape is only known at runtime.

use crate::{indexed::walk, Error, IndexedTree, Result};
use derive_more::{Display, From};
use std::iter::successors;
use tracing::debug;

/// Refers to a node held by a [TreeBuilder].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
pub struct Handle(usize);

/// Assembles an [IndexedTree] node by node, rejecting shared children and cycles as they are
/// introduced.
///
/// # Example
///
/// ```rust
/// use forest_distance::*;
///
/// let mut builder = TreeBuilder::new();
/// let root = builder.node("A");
/// let b = builder.child(root, "B")?;
/// builder.child(b, "C")?;
///
/// assert_eq!(builder.attach(b, root), Err(Error::Cycle { parent: b, child: root }));
///
/// let tree = builder.build(root)?;
/// assert_eq!(tree.len(), 3);
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder<L> {
    labels: Vec<L>,
    children: Vec<Vec<Handle>>,
    parents: Vec<Option<Handle>>,
}

impl<L> Default for TreeBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> TreeBuilder<L> {
    pub fn new() -> Self {
        TreeBuilder {
            labels: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Adds a detached node.
    pub fn node(&mut self, label: L) -> Handle {
        let handle = Handle(self.labels.len());
        self.labels.push(label);
        self.children.push(Vec::new());
        self.parents.push(None);
        handle
    }

    /// Adds a node as the last child of `parent`.
    pub fn child(&mut self, parent: Handle, label: L) -> Result<Handle> {
        self.check(parent)?;
        let child = self.node(label);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Makes `child` the last child of `parent`.
    pub fn attach(&mut self, parent: Handle, child: Handle) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;

        if let Some(p) = self.parents[child.0] {
            return Err(Error::MultipleParents { child, parent: p });
        }

        if successors(Some(parent), |h| self.parents[h.0]).any(|h| h == child) {
            return Err(Error::Cycle { parent, child });
        }

        self.parents[child.0] = Some(parent);
        self.children[parent.0].push(child);
        Ok(())
    }

    /// Indexes the tree rooted at `root`.
    ///
    /// Nodes that are not descendants of `root` are discarded.
    pub fn build(self, root: Handle) -> Result<IndexedTree<L>> {
        self.check(root)?;
        if self.parents[root.0].is_some() {
            return Err(Error::NotARoot(root));
        }

        let TreeBuilder {
            labels, children, ..
        } = self;

        let (order, kids) = walk(root, |h| h.0, |h| children[h.0].iter().copied())?;

        let mut rank = vec![None; labels.len()];
        for (post, h) in order.iter().enumerate() {
            rank[h.0] = Some(post);
        }

        let mut ranked: Vec<_> = labels
            .into_iter()
            .zip(rank)
            .filter_map(|(label, r)| r.map(|r| (r, label)))
            .collect();

        if ranked.len() < children.len() {
            debug!(
                discarded = children.len() - ranked.len(),
                "Discarded nodes unreachable from {root}"
            );
        }

        ranked.sort_unstable_by_key(|&(r, _)| r);
        let labels = ranked.into_iter().map(|(_, label)| label).collect();

        Ok(IndexedTree::from_post_order(labels, kids))
    }

    fn check(&self, handle: Handle) -> Result<()> {
        if handle.0 < self.labels.len() {
            Ok(())
        } else {
            Err(Error::UnknownNode(handle))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockTree, NodeId, Tree, TreeNode};
    use assert_matches::assert_matches;
    use test_strategy::proptest;
    use tracing_test::traced_test;

    fn rebuild<K: Clone>(t: &MockTree<K>) -> IndexedTree<K> {
        fn add<K: Clone>(b: &mut TreeBuilder<K>, parent: Handle, t: &MockTree<K>) {
            for c in t.children() {
                let h = b.child(parent, c.label.clone()).unwrap();
                add(b, h, c);
            }
        }

        let mut b = TreeBuilder::new();
        let root = b.node(t.label.clone());
        add(&mut b, root, t);
        b.build(root).unwrap()
    }

    #[proptest]
    fn building_matches_indexing(t: MockTree<u8>) {
        assert_eq!(rebuild(&t), IndexedTree::new(&t));
    }

    #[test]
    fn shared_children_are_rejected() {
        let mut b = TreeBuilder::new();
        let x = b.node('x');
        let y = b.node('y');
        let z = b.node('z');
        b.attach(x, z).unwrap();
        assert_eq!(
            b.attach(y, z),
            Err(Error::MultipleParents {
                child: z,
                parent: x
            })
        );
    }

    #[test]
    fn cycles_are_rejected() {
        let mut b = TreeBuilder::new();
        let x = b.node('x');
        assert_eq!(b.attach(x, x), Err(Error::Cycle { parent: x, child: x }));

        let y = b.child(x, 'y').unwrap();
        let z = b.child(y, 'z').unwrap();
        assert_eq!(b.attach(z, x), Err(Error::Cycle { parent: z, child: x }));
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut b = TreeBuilder::<char>::new();
        let x = b.node('x');
        assert_matches!(b.attach(x, Handle(7)), Err(Error::UnknownNode(Handle(7))));
        assert_matches!(b.build(Handle(3)), Err(Error::UnknownNode(Handle(3))));
    }

    #[test]
    fn only_parentless_nodes_can_be_roots() {
        let mut b = TreeBuilder::new();
        let x = b.node('x');
        let y = b.child(x, 'y').unwrap();
        assert_matches!(b.build(y), Err(Error::NotARoot(h)) if h == y);
    }

    #[test]
    #[traced_test]
    fn unreachable_nodes_are_discarded() {
        let mut b = TreeBuilder::new();
        let x = b.node("x");
        b.node("orphan");
        let y = b.child(x, "y").unwrap();
        b.child(y, "z").unwrap();

        let tree = b.build(x).unwrap();
        let expected = IndexedTree::new(&TreeNode::with_children(
            "x",
            [TreeNode::with_children("y", [TreeNode::new("z")])],
        ));

        assert_eq!(tree, expected);
        assert_eq!(tree.find(&"orphan"), None);
        assert_eq!(tree.root(), Some(NodeId::from(2)));
        assert!(logs_contain("Discarded nodes unreachable"));
    }
}
