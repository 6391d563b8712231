//! Arena-backed document tree.
//!
//! Nodes live in one contiguous vector and link to each other by index:
//! parent, first/last child, previous/next sibling. Nodes are never freed,
//! so a [`NodeId`] handed out by a [`Dom`] stays valid for its lifetime
//! (a detached node simply has no parent).

use std::collections::HashMap;
use std::fmt;

use html5ever::{LocalName, QualName};

use super::node_ref::{CheckedRef, NodeRef};
use crate::error::{Error, Result};
use crate::walk::{Walk, ascend, descend};

/// Index of a node in its [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node (always index 0).
    pub const DOCUMENT: NodeId = NodeId(0);

    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    /// Comment (also stands in for processing instructions).
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// Element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node and its links.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl DomNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

/// Arena-based document tree.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<DomNode>,
    /// `id` attribute -> elements carrying it, in creation order.
    id_map: HashMap<String, Vec<NodeId>>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a DOM holding only the document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![DomNode::new(NodeData::Document)],
            id_map: HashMap::new(),
        }
    }

    /// # Panics
    ///
    /// If the arena already holds `u32::MAX` nodes.
    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = next_id(self.nodes.len());
        self.nodes.push(DomNode::new(data));
        id
    }

    /// Handle to the document node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::DOCUMENT)
    }

    /// Handle to `id`, or `None` if the arena has no such node.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Unvalidated handle to `id`; link reads fail with
    /// [`Error::UnknownNode`](crate::Error::UnknownNode) if `id` is not in
    /// the arena.
    pub fn checked(&self, id: NodeId) -> CheckedRef<'_> {
        CheckedRef::new(self, id)
    }

    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.index())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut DomNode> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes, including the document and detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document node exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element, indexing its `id` attribute for
    /// [`Dom::get_by_id`].
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let id_attr = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "id")
            .map(|a| a.value.clone());

        let node = self.alloc(NodeData::Element { name, attrs });
        if let Some(value) = id_attr {
            self.id_map.entry(value).or_default().push(node);
        }
        node
    }

    /// Add `attr` to an element unless it already has one with that name.
    pub fn add_attr_if_missing(&mut self, id: NodeId, attr: Attribute) {
        let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) else {
            return;
        };
        if attrs.iter().any(|a| a.name == attr.name) {
            return;
        }
        let id_attr = (attr.name.local.as_ref() == "id").then(|| attr.value.clone());
        attrs.push(attr);
        if let Some(value) = id_attr {
            self.id_map.entry(value).or_default().push(id);
        }
    }

    /// Create a detached element in the HTML namespace.
    pub fn create_html_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|&(name, value)| Attribute {
                name: QualName::new(None, html5ever::ns!(), LocalName::from(name)),
                value: value.to_string(),
            })
            .collect();
        self.create_element(
            QualName::new(None, html5ever::ns!(html), LocalName::from(tag)),
            attrs,
        )
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(NodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(NodeData::Comment(text))
    }

    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> NodeId {
        self.alloc(NodeData::Doctype {
            name,
            public_id,
            system_id,
        })
    }

    /// Link `child` as the last child of `parent`. `child` must be detached.
    ///
    /// For building a tree before walking it; the walks never call this.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).and_then(|n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }

        if let Some(last) = last
            && let Some(node) = self.get_mut(last)
        {
            node.next_sibling = Some(child);
        }

        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = Some(child);
            }
            node.last_child = Some(child);
        }
    }

    /// Link `new_node` immediately before `sibling`. `new_node` must be
    /// detached.
    pub(crate) fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = Some(sibling);
        }

        if let Some(node) = self.get_mut(sibling) {
            node.prev_sibling = Some(new_node);
        }

        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = Some(new_node);
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.first_child = Some(new_node);
                }
            }
        }
    }

    /// Append text under `parent`, merging into its last child when that is
    /// already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).and_then(|n| n.last_child);

        if let Some(node) = last.and_then(|id| self.get_mut(id))
            && let NodeData::Text(existing) = &mut node.data
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Unlink `id` from its parent and siblings. Its own subtree stays
    /// attached to it.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = next;
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.first_child = next;
                }
            }
        }

        match next {
            Some(next) => {
                if let Some(node) = self.get_mut(next) {
                    node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(node) = parent.and_then(|p| self.get_mut(p)) {
                    node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Move every child of `from` to the end of `to`'s children.
    pub(crate) fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let mut child = self.get(from).and_then(|n| n.first_child);
        while let Some(id) = child {
            child = self.get(id).and_then(|n| n.next_sibling);
            self.detach(id);
            self.append(to, id);
        }
    }

    /// Iterate over the children of `parent`.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            dom: self,
            current: self.get(parent).and_then(|n| n.first_child),
        }
    }

    /// First node in document order matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeRef<'_>) -> bool,
    {
        let mut found = None;
        descend(self.root(), |node, _| {
            if found.is_none() && predicate(*node) {
                found = Some(node.id());
            }
            // Once matched, prune everything still ahead.
            Walk::prune_if(found.is_some())
        });
        found
    }

    /// First element with the given local name.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| node.name() == Some(tag))
    }

    /// First element, in creation order, that carries the `id` attribute
    /// value and is still attached to the document.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map
            .get(id)?
            .iter()
            .copied()
            .find(|&node| self.is_connected(node))
    }

    /// True when `id` is the document or has it as an ancestor.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let mut top = id;
        ascend(node, |ancestor| {
            top = ancestor.id();
            true
        });
        top == NodeId::DOCUMENT
    }

    /// Like [`Dom::get_by_id`], but a missing id is an error.
    pub fn require_id(&self, id: &str) -> Result<NodeId> {
        self.get_by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    /// Number of ancestors above `id`; the document is at depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let node = self.node(id)?;
        let mut depth = 0;
        ascend(node, |_| {
            depth += 1;
            true
        });
        Some(depth)
    }

    /// Local name of an element.
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Attribute value of an element, looked up by local name.
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "id")
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Content of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

fn next_id(len: usize) -> NodeId {
    match u32::try_from(len) {
        Ok(index) if index < u32::MAX => NodeId(index),
        _ => panic!("Dom capacity exceeded: {len} nodes"),
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    dom: &'a Dom,
    current: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.dom.get(id).and_then(|n| n.next_sibling);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_elements() {
        let mut dom = Dom::new();
        let div = dom.create_html_element("div", &[("id", "main")]);
        dom.append(NodeId::DOCUMENT, div);

        assert_eq!(dom.element_name(div).unwrap().as_ref(), "div");
        assert_eq!(dom.element_id(div), Some("main"));
        assert_eq!(dom.get_by_id("main"), Some(div));
        assert_eq!(dom.require_id("main").unwrap(), div);
        assert!(matches!(dom.require_id("nope"), Err(Error::MissingElement(id)) if id == "nope"));
        assert!(dom.is_element(div));
        assert!(!dom.is_empty());
    }

    #[test]
    fn test_first_id_wins() {
        let mut dom = Dom::new();
        let first = dom.create_html_element("p", &[("id", "dup")]);
        let second = dom.create_html_element("p", &[("id", "dup")]);
        dom.append(NodeId::DOCUMENT, first);
        dom.append(NodeId::DOCUMENT, second);
        assert_eq!(dom.get_by_id("dup"), Some(first));

        dom.detach(first);
        assert_eq!(dom.get_by_id("dup"), Some(second));
    }

    #[test]
    fn test_get_by_id_skips_detached() {
        let mut dom = Dom::new();
        let wrapper = dom.create_html_element("div", &[]);
        let inner = dom.create_html_element("p", &[("id", "x")]);
        dom.append(NodeId::DOCUMENT, wrapper);
        dom.append(wrapper, inner);
        assert_eq!(dom.get_by_id("x"), Some(inner));
        assert!(dom.is_connected(inner));

        dom.detach(wrapper);
        assert_eq!(dom.get_by_id("x"), None);
        assert!(!dom.is_connected(inner));
        assert!(matches!(dom.require_id("x"), Err(Error::MissingElement(_))));

        let loose = dom.create_html_element("p", &[("id", "loose")]);
        assert_eq!(dom.get_by_id("loose"), None);
        assert!(!dom.is_connected(loose));
        assert!(dom.is_connected(NodeId::DOCUMENT));
        assert!(!dom.is_connected(NodeId(999)));
    }

    #[test]
    fn test_next_id_within_range() {
        assert_eq!(next_id(0), NodeId(0));
        assert_eq!(next_id(u32::MAX as usize - 1), NodeId(u32::MAX - 1));
    }

    #[test]
    #[should_panic(expected = "Dom capacity exceeded")]
    fn test_next_id_rejects_overflow() {
        next_id(u32::MAX as usize);
    }

    #[test]
    fn test_append_and_insert_before() {
        let mut dom = Dom::new();
        let parent = dom.create_html_element("div", &[]);
        let a = dom.create_html_element("p", &[]);
        let c = dom.create_html_element("p", &[]);
        let b = dom.create_html_element("p", &[]);
        let head = dom.create_html_element("h1", &[]);

        dom.append(NodeId::DOCUMENT, parent);
        dom.append(parent, a);
        dom.append(parent, c);
        dom.insert_before(c, b);
        dom.insert_before(a, head);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![head, a, b, c]);
        assert_eq!(dom.get(parent).unwrap().first_child, Some(head));
        assert_eq!(dom.get(parent).unwrap().last_child, Some(c));
        assert_eq!(dom.get(b).unwrap().prev_sibling, Some(a));
    }

    #[test]
    fn test_text_merging() {
        let mut dom = Dom::new();
        let p = dom.create_html_element("p", &[]);
        dom.append(NodeId::DOCUMENT, p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("Hello, World!"));
        assert!(dom.is_text(children[0]));
    }

    #[test]
    fn test_detach_middle_and_ends() {
        let mut dom = Dom::new();
        let ids: Vec<_> = (0..4)
            .map(|_| {
                let id = dom.create_html_element("li", &[]);
                dom.append(NodeId::DOCUMENT, id);
                id
            })
            .collect();

        dom.detach(ids[1]);
        dom.detach(ids[0]);
        dom.detach(ids[3]);

        let children: Vec<_> = dom.children(NodeId::DOCUMENT).collect();
        assert_eq!(children, vec![ids[2]]);
        let remaining = dom.get(ids[2]).unwrap();
        assert_eq!(remaining.prev_sibling, None);
        assert_eq!(remaining.next_sibling, None);
        assert_eq!(dom.get(ids[0]).unwrap().parent, None);
    }

    #[test]
    fn test_reparent_children() {
        let mut dom = Dom::new();
        let from = dom.create_html_element("div", &[]);
        let to = dom.create_html_element("div", &[]);
        dom.append(NodeId::DOCUMENT, from);
        dom.append(NodeId::DOCUMENT, to);
        let a = dom.create_html_element("p", &[]);
        let b = dom.create_html_element("p", &[]);
        dom.append(from, a);
        dom.append(from, b);

        dom.reparent_children(from, to);

        assert_eq!(dom.children(from).count(), 0);
        assert_eq!(dom.children(to).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(dom.get(b).unwrap().parent, Some(to));
    }

    #[test]
    fn test_find_in_document_order() {
        let mut dom = Dom::new();
        let outer = dom.create_html_element("section", &[]);
        let inner = dom.create_html_element("p", &[("id", "deep")]);
        let later = dom.create_html_element("p", &[]);
        dom.append(NodeId::DOCUMENT, outer);
        dom.append(outer, inner);
        dom.append(NodeId::DOCUMENT, later);

        assert_eq!(dom.find_by_tag("p"), Some(inner));
        assert_eq!(dom.find_by_tag("table"), None);
    }

    #[test]
    fn test_depth() {
        let mut dom = Dom::new();
        let a = dom.create_html_element("div", &[]);
        let b = dom.create_html_element("p", &[]);
        let loose = dom.create_html_element("span", &[]);
        dom.append(NodeId::DOCUMENT, a);
        dom.append(a, b);

        assert_eq!(dom.depth(NodeId::DOCUMENT), Some(0));
        assert_eq!(dom.depth(b), Some(2));
        assert_eq!(dom.depth(loose), Some(0));
        assert_eq!(dom.depth(NodeId(99)), None);
    }
}
