//! html5ever TreeSink implementation for Dom.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};
use tracing::{debug, trace};

use super::arena::{Attribute, Dom, NodeId};
use crate::error::Result;

/// Parse an HTML document into a [`Dom`].
///
/// Parsing is lenient: malformed markup is repaired the way browsers do and
/// never fails.
pub fn parse_html(html: &str) -> Dom {
    parse_bytes(html.as_bytes())
}

/// Read and parse an HTML file. Invalid UTF-8 is replaced, not rejected.
pub fn parse_html_file(path: impl AsRef<Path>) -> Result<Dom> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read html file");
    Ok(parse_bytes(&bytes))
}

fn parse_bytes(bytes: &[u8]) -> Dom {
    let sink = parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(bytes);
    let dom = sink.into_dom();
    debug!(nodes = dom.len(), "parsed html document");
    dom
}

/// TreeSink that builds a [`Dom`].
///
/// html5ever's TreeSink takes `&self` everywhere, so the arena sits behind a
/// RefCell.
pub struct DomSink {
    dom: RefCell<Dom>,
    /// Element names, shared so `elem_name` can hand out references that
    /// outlive the RefCell borrow. Entries are never removed.
    names: RefCell<HashMap<NodeId, Rc<QualName>>>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for DomSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(Dom::new()),
            names: RefCell::new(HashMap::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> Dom {
        self.dom.into_inner()
    }

    pub fn quirks_mode(&self) -> QuirksMode {
        *self.quirks_mode.borrow()
    }

    fn insert(&self, target: InsertAt, child: NodeOrText<NodeId>) {
        let mut dom = self.dom.borrow_mut();
        let node = match child {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => match target {
                InsertAt::Append(parent) => {
                    dom.append_text(parent, &text);
                    return;
                }
                InsertAt::Before(_) => dom.create_text(text.to_string()),
            },
        };
        match target {
            InsertAt::Append(parent) => dom.append(parent, node),
            InsertAt::Before(sibling) => dom.insert_before(sibling, node),
        }
    }
}

#[derive(Clone, Copy)]
enum InsertAt {
    Append(NodeId),
    Before(NodeId),
}

impl TreeSink for DomSink {
    type Handle = NodeId;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        trace!(%msg, "html parse error");
    }

    fn get_document(&self) -> Self::Handle {
        NodeId::DOCUMENT
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let names = self.names.borrow();
        match names.get(target) {
            Some(name) => {
                let ptr: *const QualName = Rc::as_ptr(name);
                drop(names);
                // SAFETY: the map owns an Rc to this name for as long as
                // `self` lives and never removes entries, so the pointee
                // neither moves nor drops while the returned borrow exists.
                unsafe { &*ptr }
            }
            None => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();

        let id = self.dom.borrow_mut().create_element(name.clone(), attrs);
        self.names.borrow_mut().insert(id, Rc::new(name));
        id
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.dom.borrow_mut().create_comment(text.to_string())
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.dom.borrow_mut().create_comment(data.to_string())
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.insert(InsertAt::Append(*parent), child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self
            .dom
            .borrow()
            .get(*element)
            .is_some_and(|n| n.parent.is_some());
        if has_parent {
            self.insert(InsertAt::Before(*element), child);
        } else {
            self.insert(InsertAt::Append(*prev_element), child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doctype = dom.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        dom.append(NodeId::DOCUMENT, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents stay inline under the template element.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        self.insert(InsertAt::Before(*sibling), new_node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        for attr in attrs {
            dom.add_attr_if_missing(
                *target,
                Attribute {
                    name: attr.name,
                    value: attr.value.to_string(),
                },
            );
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.dom.borrow_mut().reparent_children(*node, *new_parent);
    }
}
