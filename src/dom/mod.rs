//! Arena-backed document tree.
//!
//! [`Dom`] stores nodes in a single vector linked by parent, child and
//! sibling indices, and [`parse_html`] builds one from markup with html5ever.
//! Its handles plug into the walks:
//!
//! - [`NodeRef`]: validated handle, implements [`TreeNode`](crate::walk::TreeNode).
//! - [`CheckedRef`]: raw id, implements [`TryTreeNode`](crate::walk::TryTreeNode)
//!   and reports ids missing from the arena as [`Error::UnknownNode`](crate::Error::UnknownNode).

mod arena;
mod node_ref;
mod tree_sink;

pub use arena::{Attribute, Children, Dom, DomNode, NodeData, NodeId};
pub use node_ref::{CheckedRef, NodeRef};
pub use tree_sink::{DomSink, parse_html, parse_html_file};
