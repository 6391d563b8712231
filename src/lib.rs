//! # domwalk
//!
//! Stack-free traversal of sibling-linked trees: every node knows its parent,
//! its first child and its next sibling, the way document trees are usually
//! stored.
//!
//! ## Walks
//!
//! - [`descend`]: visit a node and everything below it in pre-order, with the
//!   visitor deciding per node whether to [`Walk::Prune`] its children.
//! - [`ascend`]: visit a node's ancestors, nearest first, until the visitor
//!   returns `false`.
//!
//! Both take any [`TreeNode`]; node types whose link reads can fail implement
//! [`TryTreeNode`] and use [`try_descend`] / [`try_ascend`], which return the
//! first failure unchanged. Neither walk allocates or recurses.
//!
//! ## Documents
//!
//! The [`dom`] module provides an arena-backed tree that implements both
//! traits, plus an HTML parser to fill it:
//!
//! ```
//! use domwalk::dom::parse_html;
//! use domwalk::{Walk, ascend, descend};
//!
//! let dom = parse_html(r#"<nav><a id="home">Home</a><p><a>Docs</a></p></nav>"#);
//!
//! // Links that are direct children of <nav>, skipping nested content.
//! let nav = dom.node(dom.find_by_tag("nav").unwrap()).unwrap();
//! let mut top_links = 0;
//! descend(nav, |node, depth| {
//!     if depth == 1 && node.name() == Some("a") {
//!         top_links += 1;
//!     }
//!     Walk::prune_if(depth == 1)
//! });
//! assert_eq!(top_links, 1);
//!
//! // Ancestors of #home, nearest first.
//! let home = dom.node(dom.get_by_id("home").unwrap()).unwrap();
//! let mut path = Vec::new();
//! ascend(home, |node| {
//!     path.push(node.name().unwrap_or("#document"));
//!     true
//! });
//! assert_eq!(path, ["nav", "body", "html", "#document"]);
//! ```

pub mod dom;
pub mod error;
pub mod walk;

pub use error::{Error, Result};
pub use walk::{TreeNode, TryTreeNode, Walk, ascend, descend, try_ascend, try_descend};
