//! [§ 7.2 The Window object](https://html.spec.whatwg.org/multipage/nav-history-apis.html#the-window-object)
//!
//! The bundle a page script sees as its global object: the document, its
//! `localStorage` and the `Event` / `CustomEvent` constructors.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{CustomEventInit, Event, EventInit};
use crate::{Document, LocalStorage};

/// `new Event(type, init)` as a plain function pointer.
pub type EventConstructor = fn(&str, EventInit) -> Event;

/// `new CustomEvent(type, init)` as a plain function pointer.
pub type CustomEventConstructor = fn(&str, CustomEventInit) -> Event;

fn construct_event(event_type: &str, init: EventInit) -> Event {
    Event::new(event_type, init)
}

fn construct_custom_event(event_type: &str, init: CustomEventInit) -> Event {
    Event::custom(event_type, init)
}

/// Global object stand-in. Cloning yields another handle to the same
/// document and store.
#[derive(Debug, Clone)]
pub struct Window {
    document: Rc<RefCell<Document>>,
    local_storage: LocalStorage,
    event: EventConstructor,
    custom_event: CustomEventConstructor,
}

impl Window {
    /// Wrap `document` together with a fresh, empty `localStorage`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
            local_storage: LocalStorage::new(),
            event: construct_event,
            custom_event: construct_custom_event,
        }
    }

    /// `window.document`
    #[must_use]
    pub const fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    /// `window.localStorage`
    #[must_use]
    pub const fn local_storage(&self) -> &LocalStorage {
        &self.local_storage
    }

    /// `window.Event`
    #[must_use]
    pub const fn event_constructor(&self) -> EventConstructor {
        self.event
    }

    /// `window.CustomEvent`
    #[must_use]
    pub const fn custom_event_constructor(&self) -> CustomEventConstructor {
        self.custom_event
    }

    /// `new window.Event(type, init)`
    #[must_use]
    pub fn new_event(&self, event_type: &str, init: EventInit) -> Event {
        (self.event)(event_type, init)
    }

    /// `new window.CustomEvent(type, init)`
    #[must_use]
    pub fn new_custom_event(&self, event_type: &str, init: CustomEventInit) -> Event {
        (self.custom_event)(event_type, init)
    }

    /// True if both handles wrap the same document.
    #[must_use]
    pub fn same_window(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.document, &other.document)
    }
}
