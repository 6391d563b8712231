//! Node capability traits consumed by the walks.

use std::convert::Infallible;

/// Read access to the three links of a sibling-linked tree.
///
/// Implementors are cheap handles (an index plus a borrow of the arena, an
/// `Rc`, ...). The walks only ever read links through this trait; they never
/// create, destroy or mutate nodes.
pub trait TreeNode: Sized {
    /// Leftmost child, or `None` for a leaf.
    fn first_child(&self) -> Option<Self>;

    /// Sibling immediately to the right, or `None` for the last child.
    fn next_sibling(&self) -> Option<Self>;

    /// Containing node, or `None` for a root or detached node.
    fn parent(&self) -> Option<Self>;
}

/// Fallible variant of [`TreeNode`] for handles whose link reads can fail,
/// e.g. an index that may not exist in its arena.
///
/// Every [`TreeNode`] is a `TryTreeNode` that never fails.
pub trait TryTreeNode: Sized {
    /// Error produced by a failed link read.
    type Error;

    fn try_first_child(&self) -> Result<Option<Self>, Self::Error>;

    fn try_next_sibling(&self) -> Result<Option<Self>, Self::Error>;

    fn try_parent(&self) -> Result<Option<Self>, Self::Error>;
}

impl<T: TreeNode> TryTreeNode for T {
    type Error = Infallible;

    #[inline]
    fn try_first_child(&self) -> Result<Option<Self>, Infallible> {
        Ok(self.first_child())
    }

    #[inline]
    fn try_next_sibling(&self) -> Result<Option<Self>, Infallible> {
        Ok(self.next_sibling())
    }

    #[inline]
    fn try_parent(&self) -> Result<Option<Self>, Infallible> {
        Ok(self.parent())
    }
}
