//! [§ 2 Events](https://dom.spec.whatwg.org/#events)
//!
//! Plain event records plus the listener callbacks that receive them.
//! Dispatch itself lives on [`Document`] because listeners need the tree.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::{Document, NodeId};

/// Error type a listener may return. It aborts the current dispatch pass and
/// reaches the dispatcher's caller as [`crate::DomError::Listener`].
pub type ListenerError = Box<dyn Error + Send + Sync>;

type Callback = dyn Fn(&mut Document, &mut Event) -> Result<(), ListenerError>;

/// [§ 2.7 Interface EventTarget](https://dom.spec.whatwg.org/#interface-eventtarget)
///
/// A registered event listener callback.
///
/// Clones share the same callback, so a clone can later be passed to
/// [`Document::remove_event_listener`] to unregister the original.
#[derive(Clone)]
pub struct Listener(Rc<Callback>);

impl Listener {
    /// Wrap a callback. The callback receives the document the event is
    /// dispatched in and the event itself; `event.current_target()` is the
    /// node the listener was registered on.
    #[must_use]
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Document, &mut Event) -> Result<(), ListenerError> + 'static,
    {
        Self(Rc::new(callback))
    }

    /// True if both handles refer to the same registered callback.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(
        &self,
        document: &mut Document,
        event: &mut Event,
    ) -> Result<(), ListenerError> {
        (self.0)(document, event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// Per-target listener table keyed by event type.
#[derive(Debug, Default)]
pub(crate) struct ListenerMap {
    by_type: HashMap<String, Vec<Listener>>,
}

impl ListenerMap {
    /// Registration order is kept and duplicates are not filtered.
    pub(crate) fn add(&mut self, event_type: &str, listener: Listener) {
        self.by_type
            .entry(event_type.to_string())
            .or_default()
            .push(listener);
    }

    /// Removes the first registration of `listener` for `event_type`.
    pub(crate) fn remove(&mut self, event_type: &str, listener: &Listener) {
        let Some(listeners) = self.by_type.get_mut(event_type) else {
            return;
        };
        if let Some(index) = listeners.iter().position(|l| l.same(listener)) {
            let _ = listeners.remove(index);
        }
    }

    /// Copy of the current listeners for `event_type`. Dispatch iterates the
    /// copy, so registrations made by a listener only apply to later passes.
    pub(crate) fn snapshot(&self, event_type: &str) -> Vec<Listener> {
        self.by_type.get(event_type).cloned().unwrap_or_default()
    }
}

/// [§ 2.2 EventInit](https://dom.spec.whatwg.org/#dictdef-eventinit)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventInit {
    /// Carried on the event but inert: dispatch never walks ancestors.
    pub bubbles: bool,
    /// Whether [`Event::prevent_default`] has any effect.
    pub cancelable: bool,
}

/// [§ 2.4 CustomEventInit](https://dom.spec.whatwg.org/#dictdef-customeventinit)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomEventInit {
    /// See [`EventInit::bubbles`].
    pub bubbles: bool,
    /// See [`EventInit::cancelable`].
    pub cancelable: bool,
    /// Opaque payload exposed as [`Event::detail`].
    pub detail: Value,
}

/// [§ 2.2 Interface Event](https://dom.spec.whatwg.org/#interface-event)
///
/// Built right before dispatch and discarded afterwards. Custom events
/// (built with [`Event::custom`]) also carry a `detail` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    default_prevented: bool,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    detail: Option<Value>,
}

impl Event {
    /// `new Event(type, init)`
    #[must_use]
    pub fn new(event_type: impl Into<String>, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            default_prevented: false,
            target: None,
            current_target: None,
            detail: None,
        }
    }

    /// `new CustomEvent(type, init)`
    #[must_use]
    pub fn custom(event_type: impl Into<String>, init: CustomEventInit) -> Self {
        Self {
            detail: Some(init.detail),
            ..Self::new(
                event_type,
                EventInit {
                    bubbles: init.bubbles,
                    cancelable: init.cancelable,
                },
            )
        }
    }

    /// The event type, e.g. `"click"` or `"submit"`.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The `bubbles` flag given at construction.
    #[must_use]
    pub const fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// The `cancelable` flag given at construction.
    #[must_use]
    pub const fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// [§ 2.2 defaultPrevented](https://dom.spec.whatwg.org/#dom-event-defaultprevented)
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The node the event was first dispatched to. [`NodeId::DOCUMENT`] for
    /// document-level dispatch.
    #[must_use]
    pub const fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listeners are currently running.
    #[must_use]
    pub const fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Payload of a custom event; `None` for plain events.
    #[must_use]
    pub const fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    /// True for events built with [`Event::custom`].
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.detail.is_some()
    }

    /// [§ 2.2 preventDefault](https://dom.spec.whatwg.org/#dom-event-preventdefault)
    ///
    /// "The preventDefault() method steps are to set the canceled flag if
    /// this's cancelable attribute value is true"
    ///
    /// Once set, the flag stays set for the lifetime of this event.
    pub const fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Point the event at `node`. The target is only set the first time, the
    /// current target every time.
    pub(crate) const fn retarget(&mut self, node: NodeId) {
        if self.target.is_none() {
            self.target = Some(node);
        }
        self.current_target = Some(node);
    }
}
