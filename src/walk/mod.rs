//! Traversal engine for sibling-linked trees.
//!
//! Two walks over any type implementing [`TreeNode`] (or [`TryTreeNode`]):
//!
//! - [`descend`]: pre-order, depth-first, bounded to the start node's subtree,
//!   with per-node pruning via [`Walk`].
//! - [`ascend`]: the start node's ancestors, nearest first, until the root or
//!   until the visitor returns `false`.
//!
//! Both run in constant auxiliary memory and never recurse, so tree depth is
//! limited only by the tree itself.
//!
//! # Example
//!
//! ```
//! use domwalk::dom::parse_html;
//! use domwalk::walk::{Walk, descend};
//!
//! let dom = parse_html("<ul><li>one</li><li>two</li></ul>");
//! let mut tags = Vec::new();
//! descend(dom.root(), |node, _depth| {
//!     if let Some(name) = node.name() {
//!         tags.push(name.to_string());
//!     }
//!     Walk::Continue
//! });
//! assert_eq!(tags, ["html", "head", "body", "ul", "li", "li"]);
//! ```

mod ascend;
mod descend;
#[cfg(test)]
pub(crate) mod fixture;
mod node;

pub use ascend::{ascend, try_ascend};
pub use descend::{Walk, descend, try_descend};
pub use node::{TreeNode, TryTreeNode};
