//! Ancestor-chain ascent.

use super::node::{TreeNode, TryTreeNode};

/// Visit the ancestors of `start`, nearest first.
///
/// `start` itself is not visited; the first call receives its parent. The
/// walk ends after the topmost ancestor, or as soon as `visit` returns
/// `false`.
pub fn ascend<N, F>(start: N, visit: F)
where
    N: TreeNode,
    F: FnMut(&N) -> bool,
{
    let Ok(()) = try_ascend(start, visit);
}

/// [`ascend`] over nodes whose link reads can fail.
pub fn try_ascend<N, F>(start: N, mut visit: F) -> Result<(), N::Error>
where
    N: TryTreeNode,
    F: FnMut(&N) -> bool,
{
    let mut current = start.try_parent()?;
    while let Some(node) = current {
        if !visit(&node) {
            break;
        }
        current = node.try_parent()?;
    }
    Ok(())
}
