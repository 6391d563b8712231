//! Minimal index-linked tree for exercising the walks in unit tests.

use super::{TreeNode, TryTreeNode};

#[derive(Debug, Default)]
pub(crate) struct Tree {
    parent: Vec<Option<usize>>,
    first_child: Vec<Option<usize>>,
    last_child: Vec<Option<usize>>,
    next_sibling: Vec<Option<usize>>,
}

impl Tree {
    /// Create a tree holding a single root (index 0).
    pub(crate) fn new() -> Self {
        let mut tree = Self::default();
        tree.push(None);
        tree
    }

    /// Add a detached root and return its index.
    pub(crate) fn add_root(&mut self) -> usize {
        self.push(None)
    }

    /// Append a new last child under `parent` and return its index.
    pub(crate) fn add(&mut self, parent: usize) -> usize {
        let id = self.push(Some(parent));
        match self.last_child[parent] {
            Some(last) => self.next_sibling[last] = Some(id),
            None => self.first_child[parent] = Some(id),
        }
        self.last_child[parent] = Some(id);
        id
    }

    /// Drop `id`'s parent link only, leaving it in its parent's child chain.
    pub(crate) fn cut_parent(&mut self, id: usize) {
        self.parent[id] = None;
    }

    pub(crate) fn node(&self, id: usize) -> Node<'_> {
        Node { tree: self, id }
    }

    fn push(&mut self, parent: Option<usize>) -> usize {
        let id = self.parent.len();
        self.parent.push(parent);
        self.first_child.push(None);
        self.last_child.push(None);
        self.next_sibling.push(None);
        id
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    tree: &'a Tree,
    pub(crate) id: usize,
}

impl TreeNode for Node<'_> {
    fn first_child(&self) -> Option<Self> {
        self.tree.first_child[self.id].map(|id| self.tree.node(id))
    }

    fn next_sibling(&self) -> Option<Self> {
        self.tree.next_sibling[self.id].map(|id| self.tree.node(id))
    }

    fn parent(&self) -> Option<Self> {
        self.tree.parent[self.id].map(|id| self.tree.node(id))
    }
}

/// Link-read failure reported by [`Failing`], carrying the node it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinkError(pub(crate) usize);

/// [`Node`] whose sibling or parent read fails at one chosen node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Failing<'a> {
    pub(crate) node: Node<'a>,
    broken_sibling: Option<usize>,
    broken_parent: Option<usize>,
}

impl<'a> Failing<'a> {
    /// Reading the next sibling of `broken` fails.
    pub(crate) fn sibling(node: Node<'a>, broken: usize) -> Self {
        Self {
            node,
            broken_sibling: Some(broken),
            broken_parent: None,
        }
    }

    /// Reading the parent of `broken` fails.
    pub(crate) fn parent(node: Node<'a>, broken: usize) -> Self {
        Self {
            node,
            broken_sibling: None,
            broken_parent: Some(broken),
        }
    }

    fn wrap(&self, node: Option<Node<'a>>) -> Option<Self> {
        node.map(|node| Self { node, ..*self })
    }

    fn check(&self, broken: Option<usize>) -> Result<(), LinkError> {
        match broken {
            Some(id) if id == self.node.id => Err(LinkError(id)),
            _ => Ok(()),
        }
    }
}

impl TryTreeNode for Failing<'_> {
    type Error = LinkError;

    fn try_first_child(&self) -> Result<Option<Self>, LinkError> {
        Ok(self.wrap(self.node.first_child()))
    }

    fn try_next_sibling(&self) -> Result<Option<Self>, LinkError> {
        self.check(self.broken_sibling)?;
        Ok(self.wrap(self.node.next_sibling()))
    }

    fn try_parent(&self) -> Result<Option<Self>, LinkError> {
        self.check(self.broken_parent)?;
        Ok(self.wrap(self.node.parent()))
    }
}
