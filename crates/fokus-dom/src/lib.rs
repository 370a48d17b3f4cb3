//! In-memory document emulation for the Fokus widget.
//!
//! This crate provides the small slice of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) that a click/submit
//! driven UI needs in order to run under test without a browser:
//!
//! - an element tree with attributes and a [`ClassList`] kept in sync with
//!   the `class` attribute,
//! - synchronous [`Event`] dispatch with cancellation,
//! - single-fragment [`Selector`] lookup (`.class`, `#id`, `tag`),
//! - a [`LocalStorage`] key-value store,
//! - a [`Window`] bundle and a per-test [`DomEnvironment`] that can be
//!   installed as ambient [`globals`].
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. A parent
//! owns its children through its child list; the parent link is only an index
//! back into the arena.

mod class_list;
mod document;
mod element;
mod environment;
mod error;
mod event;
pub mod globals;
mod selector;
mod storage;
mod window;

use std::collections::HashMap;

pub use class_list::{ClassList, ClassListMut};
pub use document::Document;
pub use element::Element;
pub use environment::{DomEnvironment, GlobalsGuard, create_dom_environment};
pub use error::DomError;
pub use event::{CustomEventInit, Event, EventInit, Listener, ListenerError};
pub use selector::Selector;
pub use storage::LocalStorage;
pub use window::{CustomEventConstructor, EventConstructor, Window};

use event::ListenerMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// A `NodeId` is only meaningful for the [`Document`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    ///
    /// It is not an element: it carries the document-level listener table and
    /// is the parent of the root element.
    pub const DOCUMENT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
    /// "Each EventTarget object has an associated event listener list"
    pub(crate) listeners: ListenerMap,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(Element),
}

/// Arena-based DOM tree with O(1) node access.
///
/// All nodes live in a contiguous vector and refer to each other by index.
/// Detached nodes stay in the arena; they simply have no parent.
#[derive(Debug)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::DOCUMENT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree holding only the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
                listeners: ListenerMap::default(),
            }],
        }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the Document node is allocated up front.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its ID.
    pub(crate) fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            listeners: ListenerMap::default(),
        });
        id
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`, detaching it from its
    /// previous parent first. Both IDs must already be valid.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let _ = self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        tracing::trace!(?parent, ?child, "appended node");
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from its parent. Returns false if it had none.
    pub(crate) fn detach(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.parent(child) else {
            return false;
        };
        let siblings = &mut self.nodes[parent.0].children;
        if let Some(index) = siblings.iter().position(|&id| id == child) {
            let _ = siblings.remove(index);
        }
        self.nodes[child.0].parent = None;
        tracing::trace!(?parent, ?child, "detached node");
        true
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to the Document.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of a node in tree order
    /// (pre-order, depth-first, left to right). The node itself is excluded.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Document => None,
        })
    }

    pub(crate) fn as_element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Document => None,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
