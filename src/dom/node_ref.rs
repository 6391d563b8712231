//! Handles that expose [`Dom`] nodes to the walks.

use std::fmt;

use super::arena::{Dom, DomNode, NodeData, NodeId};
use crate::error::Error;
use crate::walk::{TreeNode, TryTreeNode};

/// Borrowed handle to a node known to exist in its [`Dom`].
///
/// Holding a `NodeRef` keeps the `Dom` immutably borrowed, so the tree cannot
/// change under a walk over these handles.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(super) fn new(dom: &'a Dom, id: NodeId) -> Self {
        Self { dom, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn dom(&self) -> &'a Dom {
        self.dom
    }

    /// The node's payload.
    pub fn data(&self) -> Option<&'a NodeData> {
        self.raw().map(|n| &n.data)
    }

    /// Local name, for elements.
    pub fn name(&self) -> Option<&'a str> {
        self.dom.element_name(self.id).map(|name| &**name)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.dom.attr(self.id, name)
    }

    /// Content, for text nodes.
    pub fn text(&self) -> Option<&'a str> {
        self.dom.text_content(self.id)
    }

    pub fn is_element(&self) -> bool {
        self.dom.is_element(self.id)
    }

    fn raw(&self) -> Option<&'a DomNode> {
        self.dom.get(self.id)
    }

    fn link(&self, pick: fn(&DomNode) -> Option<NodeId>) -> Option<Self> {
        self.raw().and_then(pick).map(|id| Self::new(self.dom, id))
    }
}

impl TreeNode for NodeRef<'_> {
    fn first_child(&self) -> Option<Self> {
        self.link(|n| n.first_child)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.link(|n| n.next_sibling)
    }

    fn parent(&self) -> Option<Self> {
        self.link(|n| n.parent)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dom, other.dom) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.id).finish()
    }
}

/// One-line summary: `<div id="main">`, `"text"`, `<!-- note -->`, ...
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Some(NodeData::Document) => f.write_str("#document"),
            Some(NodeData::Element { name, attrs }) => {
                write!(f, "<{}", name.local)?;
                for attr in attrs {
                    write!(f, " {}={:?}", attr.name.local, attr.value)?;
                }
                f.write_str(">")
            }
            Some(NodeData::Text(text)) => write!(f, "{:?}", text),
            Some(NodeData::Comment(text)) => write!(f, "<!--{text}-->"),
            Some(NodeData::Doctype { name, .. }) => write!(f, "<!DOCTYPE {name}>"),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Handle to an id that may not exist in its [`Dom`].
///
/// Every link read looks the id up first and fails with
/// [`Error::UnknownNode`] if it is not in the arena.
#[derive(Debug, Clone, Copy)]
pub struct CheckedRef<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl<'a> CheckedRef<'a> {
    pub(super) fn new(dom: &'a Dom, id: NodeId) -> Self {
        Self { dom, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Validate into a [`NodeRef`].
    pub fn resolve(&self) -> Result<NodeRef<'a>, Error> {
        self.dom.node(self.id).ok_or(Error::UnknownNode(self.id))
    }

    fn link(&self, pick: fn(&DomNode) -> Option<NodeId>) -> Result<Option<Self>, Error> {
        let node = self.dom.get(self.id).ok_or(Error::UnknownNode(self.id))?;
        Ok(pick(node).map(|id| Self::new(self.dom, id)))
    }
}

impl TryTreeNode for CheckedRef<'_> {
    type Error = Error;

    fn try_first_child(&self) -> Result<Option<Self>, Error> {
        self.link(|n| n.first_child)
    }

    fn try_next_sibling(&self) -> Result<Option<Self>, Error> {
        self.link(|n| n.next_sibling)
    }

    fn try_parent(&self) -> Result<Option<Self>, Error> {
        self.link(|n| n.parent)
    }
}
