/// An abstraction for a generic labeled tree node.
pub trait Node<'n> {
    /// The type of this [Node]'s [label][Node::label].
    ///
    /// Labels are compared by the [CostModel][crate::CostModel] when relabeling.
    type Label;

    /// Returns this [Node]'s label.
    fn label(&'n self) -> Self::Label;
}

/// An abstraction for a recursive ordered tree.
pub trait Tree<'t>: 't + Node<'t> {
    /// A type that can iterate over this [Tree]'s [children][Tree::children] in order.
    type Children: IntoIterator<Item = &'t Self>;

    /// Returns this [Tree]'s immediate children.
    fn children(&'t self) -> Self::Children;
}

/// A plain owned [Tree], handy when the caller has no tree type of its own.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct TreeNode<L> {
    pub label: L,
    pub children: Vec<TreeNode<L>>,
}

impl<L> TreeNode<L> {
    /// A leaf.
    #[inline]
    pub fn new(label: L) -> Self {
        Self::with_children(label, [])
    }

    /// A node with the given children, in order.
    pub fn with_children<I: IntoIterator<Item = Self>>(label: L, children: I) -> Self {
        TreeNode {
            label,
            children: children.into_iter().collect(),
        }
    }

    /// Appends a child and returns `self`.
    pub fn push(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl<'n, L: Clone> Node<'n> for TreeNode<L> {
    type Label = L;

    #[inline]
    fn label(&'n self) -> Self::Label {
        self.label.clone()
    }
}

impl<'t, L: 't + Clone> Tree<'t> for TreeNode<L> {
    type Children = &'t [Self];

    #[inline]
    fn children(&'t self) -> Self::Children {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derive_more::From;
    use proptest::{collection::vec, prelude::*, strategy::LazyJust};
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, From)]
    pub struct Size {
        depth: usize,
        breadth: usize,
    }

    impl Default for Size {
        fn default() -> Self {
            (4, 3).into()
        }
    }

    fn tree<K: 'static + Clone + Arbitrary>(size: Size) -> impl Strategy<Value = MockTree<K>> {
        let depth = size.depth as u32;
        let breadth = size.breadth as u32;
        let size = (breadth.pow(depth + 1) - 1) / (breadth - 1) / 2; // half the maximum number of nodes

        (any::<K>(), LazyJust::new(Vec::new))
            .prop_map_into()
            .prop_recursive(depth, size, breadth, move |inner| {
                (any::<K>(), vec(inner, ..=breadth as usize)).prop_map_into()
            })
    }

    #[derive(Debug, Default, Clone, PartialEq, Eq, Hash, From)]
    pub(crate) struct MockTree<K> {
        pub(crate) label: K,
        pub(crate) children: Vec<Self>,
    }

    impl<K: 'static + Clone + Arbitrary> Arbitrary for MockTree<K> {
        type Parameters = Size;
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(size: Size) -> Self::Strategy {
            tree(size).boxed()
        }
    }

    impl<'n, K: Clone> Node<'n> for MockTree<K> {
        type Label = K;
        fn label(&'n self) -> Self::Label {
            self.label.clone()
        }
    }

    impl<'t, K: 't + Clone> Tree<'t> for MockTree<K> {
        type Children = &'t [Self];
        fn children(&'t self) -> Self::Children {
            &self.children
        }
    }

    impl<K: Clone> MockTree<K> {
        pub(crate) fn count(&self) -> usize {
            1 + self.children.iter().map(Self::count).sum::<usize>()
        }

        /// Removes every node that is a leaf in `self`, except the root.
        pub(crate) fn prune(&self) -> Self {
            MockTree {
                label: self.label.clone(),
                children: self
                    .children
                    .iter()
                    .filter(|c| !c.children.is_empty())
                    .map(Self::prune)
                    .collect(),
            }
        }
    }

    /// A short label over a tiny alphabet, so that labels collide often.
    #[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Arbitrary)]
    pub(crate) struct Word(#[strategy("[a-c]{0,3}")] pub(crate) String);

    impl AsRef<str> for Word {
        fn as_ref(&self) -> &str {
            &self.0
        }
    }

    #[proptest]
    fn children_are_visited_in_order(t: MockTree<u8>) {
        let labels: Vec<_> = t.children().into_iter().map(|c| c.label()).collect();
        let expected: Vec<_> = t.children.iter().map(|c| c.label).collect();
        assert_eq!(labels, expected);
    }

    #[proptest]
    fn pruning_never_grows_the_tree(t: MockTree<()>) {
        assert!(t.prune().count() <= t.count());
    }

    #[test]
    fn tree_node_builders_agree() {
        let a = TreeNode::with_children("A", [TreeNode::new("B"), TreeNode::new("C")]);
        let b = TreeNode::new("A").push(TreeNode::new("B")).push(TreeNode::new("C"));
        assert_eq!(a, b);
        assert_eq!(a.label(), "A");
        assert_eq!(a.children().len(), 2);
    }
}

#[cfg(test)]
pub(crate) use tests::{MockTree, Word};
