//! Pre-order depth-first descent with per-node pruning.

use tracing::debug;

use super::node::{TreeNode, TryTreeNode};

/// Visitor decision returned for each node during [`descend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[must_use]
pub enum Walk {
    /// Enter this node's children next.
    #[default]
    Continue,
    /// Skip this node's children. The node itself has already been visited.
    Prune,
}

impl Walk {
    /// `Prune` when `cond` holds, `Continue` otherwise.
    pub fn prune_if(cond: bool) -> Self {
        if cond { Walk::Prune } else { Walk::Continue }
    }
}

/// Visit `start` and every node below it in pre-order.
///
/// `visit` receives each node with its depth relative to `start` (which is
/// depth 0). Children are visited left to right. Returning [`Walk::Prune`]
/// skips the node's children; the walk then moves on to the node's next
/// sibling, or back up.
///
/// The walk is bounded to the subtree rooted at `start`: `start`'s own
/// siblings and ancestors are never visited.
///
/// No recursion and no auxiliary stack: the only state is the current node,
/// its depth and whether its children are already done. That means the
/// visitor must not change the links the walk follows next (the current
/// node's first child, next sibling and parent, and the parent links on the
/// way back to `start`). A cyclic tree makes the walk loop forever.
///
/// `start` is moved into the walk and dropped once the walk leaves it, so the
/// caller must keep the tree alive independently of that handle. For trees
/// that own children strongly and point at parents weakly (`Rc`/`Weak`), a
/// start handle that is the only owner frees the tree as the walk moves down,
/// and the walk ends early at the first parent link it can no longer follow.
/// Pass a clone instead.
pub fn descend<N, F>(start: N, visit: F)
where
    N: TreeNode,
    F: FnMut(&N, usize) -> Walk,
{
    let Ok(()) = try_descend(start, visit);
}

/// [`descend`] over nodes whose link reads can fail.
///
/// The first failed read ends the walk and is returned as-is. The same
/// ownership rule applies: keep the tree alive independently of `start`.
pub fn try_descend<N, F>(start: N, mut visit: F) -> Result<(), N::Error>
where
    N: TryTreeNode,
    F: FnMut(&N, usize) -> Walk,
{
    let mut node = start;
    let mut depth = 0usize;
    // Set when `node`'s subtree has been handled (pruned, or backtracked into).
    let mut skip = false;

    loop {
        if !skip {
            skip = visit(&node, depth) == Walk::Prune;
        }

        if !skip && let Some(child) = node.try_first_child()? {
            node = child;
            depth += 1;
            continue;
        }

        if depth == 0 {
            return Ok(());
        }

        if let Some(sibling) = node.try_next_sibling()? {
            node = sibling;
            skip = false;
            continue;
        }

        match node.try_parent()? {
            Some(parent) => {
                node = parent;
                depth -= 1;
                skip = true;
            }
            // Detached under us (or the tree was dropped); nothing left to reach.
            None => {
                debug!(depth, "parent link missing mid-walk; ending descend");
                return Ok(());
            }
        }
    }
}
