//! [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
//!
//! The document owns the arena, hands out [`NodeId`]s from its element
//! factory, and implements everything that needs the tree: appending and
//! removing nodes, listener registration, dispatch and selector lookup.

use crate::event::{Event, EventInit, Listener};
use crate::{DomError, DomTree, Element, NodeId, NodeType, Selector};

/// The tree root plus a document-level listener table.
///
/// The document holds exactly one root element (`body` unless built with
/// [`Document::with_root`]). Document-level listeners live on
/// [`NodeId::DOCUMENT`] and are independent of the root element's listeners.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    root: NodeId,
}

impl Document {
    /// A document whose root element is `body`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("body")
    }

    /// A document whose root element has the given tag.
    #[must_use]
    pub fn with_root(tag_name: &str) -> Self {
        let mut tree = DomTree::new();
        let root = tree.alloc(NodeType::Element(Element::new(tag_name)));
        tree.append_child(NodeId::DOCUMENT, root);
        Self { tree, root }
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// [§ 3.1.3 body](https://html.spec.whatwg.org/multipage/dom.html#dom-document-body)
    ///
    /// Alias for [`Document::root`]; the root is the body-equivalent.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.root
    }

    /// Read-only view of the underlying arena.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// The new element is detached until appended somewhere.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.tree.alloc(NodeType::Element(Element::new(tag_name)))
    }

    /// Element data for `id`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if `id` was not allocated here,
    /// [`DomError::NotAnElement`] for [`NodeId::DOCUMENT`].
    pub fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        match self.tree.get(id) {
            None => Err(DomError::UnknownNode(id)),
            Some(node) => match &node.node_type {
                NodeType::Element(element) => Ok(element),
                NodeType::Document => Err(DomError::NotAnElement(id)),
            },
        }
    }

    /// Mutable element data for `id`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::element`].
    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        if self.tree.get(id).is_none() {
            return Err(DomError::UnknownNode(id));
        }
        self.tree
            .as_element_mut(id)
            .ok_or(DomError::NotAnElement(id))
    }

    /// Parent element of `id`. `None` for detached nodes and for the root,
    /// whose parent is the document itself.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .parent(id)
            .filter(|&parent| parent != NodeId::DOCUMENT)
    }

    /// Children of `id` in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// [§ 4.2.6 append](https://dom.spec.whatwg.org/#dom-parentnode-append)
    ///
    /// Appends `nodes` to `parent` in order. A node that already has a parent
    /// is detached from it first. Every node is validated before any is moved,
    /// so a failing call leaves the tree untouched.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotAnElement`] if a node is not an element (the document).
    /// - [`DomError::UnknownNode`] if an ID is foreign to this document.
    /// - [`DomError::HierarchyRequest`] if `parent` is the document, a node is
    ///   `parent` itself or one of its ancestors, or a node is the root.
    pub fn append(&mut self, parent: NodeId, nodes: &[NodeId]) -> Result<(), DomError> {
        for &child in nodes {
            let _ = self.element(child)?;
            let _ = self.element(parent).map_err(|e| match e {
                DomError::NotAnElement(_) => DomError::HierarchyRequest { parent, child },
                other => other,
            })?;
            if child == parent
                || child == self.root
                || self.tree.is_descendant_of(parent, child)
            {
                return Err(DomError::HierarchyRequest { parent, child });
            }
        }
        for &child in nodes {
            self.tree.append_child(parent, child);
        }
        Ok(())
    }

    /// [§ 4.4 removeChild](https://dom.spec.whatwg.org/#dom-node-removechild)
    ///
    /// No-op when `child` is not a direct child of `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if either ID is foreign to this document.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure_known(parent)?;
        self.ensure_known(child)?;
        if self.tree.parent(child) == Some(parent) && parent != NodeId::DOCUMENT {
            let _ = self.tree.detach(child);
        }
        Ok(())
    }

    /// [§ 5.2.2 remove](https://dom.spec.whatwg.org/#dom-childnode-remove)
    ///
    /// Removes `id` from its parent element. No-op for detached nodes and
    /// for the root.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if `id` is foreign to this document.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.ensure_known(id)?;
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id)?;
        }
        Ok(())
    }

    /// [§ 2.7 addEventListener](https://dom.spec.whatwg.org/#dom-eventtarget-addeventlistener)
    ///
    /// Registrations are never deduplicated: the same listener added twice
    /// runs twice.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if `target` is foreign to this document.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.tree
            .get_mut(target)
            .ok_or(DomError::UnknownNode(target))?
            .listeners
            .add(event_type, listener);
        Ok(())
    }

    /// [§ 2.7 removeEventListener](https://dom.spec.whatwg.org/#dom-eventtarget-removeeventlistener)
    ///
    /// Removes the first registration of `listener`. No-op if it was never
    /// registered for `event_type`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if `target` is foreign to this document.
    pub fn remove_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: &Listener,
    ) -> Result<(), DomError> {
        self.tree
            .get_mut(target)
            .ok_or(DomError::UnknownNode(target))?
            .listeners
            .remove(event_type, listener);
        Ok(())
    }

    /// `document.addEventListener(type, listener)`
    pub fn add_document_listener(&mut self, event_type: &str, listener: Listener) {
        if let Some(node) = self.tree.get_mut(NodeId::DOCUMENT) {
            node.listeners.add(event_type, listener);
        }
    }

    /// `document.removeEventListener(type, listener)`
    pub fn remove_document_listener(&mut self, event_type: &str, listener: &Listener) {
        if let Some(node) = self.tree.get_mut(NodeId::DOCUMENT) {
            node.listeners.remove(event_type, listener);
        }
    }

    /// Install or clear the legacy `onclick` handler of an element.
    ///
    /// # Errors
    ///
    /// Same as [`Document::element_mut`].
    pub fn set_onclick(&mut self, id: NodeId, handler: Option<Listener>) -> Result<(), DomError> {
        self.element_mut(id)?.onclick = handler;
        Ok(())
    }

    /// [§ 2.9 dispatchEvent](https://dom.spec.whatwg.org/#dom-eventtarget-dispatchevent)
    ///
    /// Sets the event's target (only if unset) and current target to
    /// `target`, then runs a snapshot of `target`'s listeners for the event
    /// type in registration order. The event is not propagated to ancestors.
    ///
    /// Returns `false` if a listener cancelled the event.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a foreign `target`, or
    /// [`DomError::Listener`] wrapping the first listener error, which stops
    /// the pass.
    pub fn dispatch_event(&mut self, target: NodeId, event: &mut Event) -> Result<bool, DomError> {
        let listeners = self
            .tree
            .get(target)
            .ok_or(DomError::UnknownNode(target))?
            .listeners
            .snapshot(event.event_type());

        event.retarget(target);
        tracing::debug!(
            event_type = event.event_type(),
            ?target,
            listeners = listeners.len(),
            "dispatching event"
        );

        for listener in &listeners {
            self.invoke(listener, event)?;
        }
        Ok(!event.default_prevented())
    }

    /// `document.dispatchEvent(event)`: runs the document-level listeners.
    ///
    /// # Errors
    ///
    /// [`DomError::Listener`] wrapping the first listener error.
    pub fn dispatch_document_event(&mut self, event: &mut Event) -> Result<bool, DomError> {
        self.dispatch_event(NodeId::DOCUMENT, event)
    }

    /// [`HTMLElement.click()`](https://html.spec.whatwg.org/multipage/interaction.html#dom-click)
    ///
    /// Runs the legacy `onclick` handler, if any, then every registered
    /// `click` listener in order. Each invocation gets a fresh `click` event
    /// targeted at `id`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::element`], or [`DomError::Listener`].
    pub fn click(&mut self, id: NodeId) -> Result<(), DomError> {
        let onclick = self.element(id)?.onclick.clone();
        if let Some(handler) = onclick {
            self.invoke(&handler, &mut synthetic_click(id))?;
        }

        let listeners = self
            .tree
            .get(id)
            .ok_or(DomError::UnknownNode(id))?
            .listeners
            .snapshot("click");
        tracing::debug!(?id, listeners = listeners.len(), "synthetic click");
        for listener in &listeners {
            self.invoke(listener, &mut synthetic_click(id))?;
        }
        Ok(())
    }

    /// [§ 4.9 matches](https://dom.spec.whatwg.org/#dom-element-matches)
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`], or the errors of [`Document::element`].
    pub fn matches(&self, id: NodeId, selector: &str) -> Result<bool, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.element(id)?.matches(&selector))
    }

    /// `document.querySelector(selectors)`: first match in tree order. The
    /// root element itself is eligible.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`].
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        self.query_selector_within(NodeId::DOCUMENT, selector)
    }

    /// `document.querySelectorAll(selectors)`: every match in tree order,
    /// root element included.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`].
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.query_selector_all_within(NodeId::DOCUMENT, selector)
    }

    /// [§ 4.2.6 querySelector](https://dom.spec.whatwg.org/#dom-parentnode-queryselector)
    ///
    /// "Returns the first element that is a descendant of node that matches
    /// selectors." `scope` itself is never a candidate.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`], or [`DomError::UnknownNode`] for a
    /// foreign `scope`.
    pub fn query_selector_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        self.ensure_known(scope)?;
        Ok(self.matching_descendants(scope, &selector).next())
    }

    /// [§ 4.2.6 querySelectorAll](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
    ///
    /// "Returns all element descendants of node that match selectors", in
    /// pre-order depth-first order.
    ///
    /// # Errors
    ///
    /// Same as [`Document::query_selector_within`].
    pub fn query_selector_all_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        self.ensure_known(scope)?;
        Ok(self.matching_descendants(scope, &selector).collect())
    }

    fn matching_descendants<'a>(
        &'a self,
        scope: NodeId,
        selector: &'a Selector,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.tree.descendants(scope).filter(move |&id| {
            self.tree
                .as_element(id)
                .is_some_and(|element| element.matches(selector))
        })
    }

    fn invoke(&mut self, listener: &Listener, event: &mut Event) -> Result<(), DomError> {
        listener.call(self, event).map_err(|source| DomError::Listener {
            event_type: event.event_type().to_string(),
            source,
        })
    }

    fn ensure_known(&self, id: NodeId) -> Result<(), DomError> {
        self.tree
            .get(id)
            .map(|_| ())
            .ok_or(DomError::UnknownNode(id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn synthetic_click(target: NodeId) -> Event {
    let mut event = Event::new("click", EventInit::default());
    event.retarget(target);
    event
}
