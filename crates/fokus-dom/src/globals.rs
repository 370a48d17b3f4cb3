//! Ambient browser globals.
//!
//! Code written against a browser expects `document`, `localStorage`,
//! `Event` and `CustomEvent` to simply be there. This module is that
//! ambient namespace. Bindings are installed and removed by
//! [`crate::DomEnvironment`]; readers here only look.
//!
//! Bindings are per thread: the test harness runs each test on its own
//! thread, and the handles inside are not `Send` anyway.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{CustomEventConstructor, Document, EventConstructor, LocalStorage, Window};

/// One complete set of ambient bindings.
#[derive(Debug, Clone)]
pub struct Globals {
    /// `window`
    pub window: Window,
    /// `document`
    pub document: Rc<RefCell<Document>>,
    /// `localStorage`
    pub local_storage: LocalStorage,
    /// `Event`
    pub event: EventConstructor,
    /// `CustomEvent`
    pub custom_event: CustomEventConstructor,
}

impl Globals {
    /// The bindings a page would see for `window`.
    #[must_use]
    pub fn from_window(window: &Window) -> Self {
        Self {
            window: window.clone(),
            document: Rc::clone(window.document()),
            local_storage: window.local_storage().clone(),
            event: window.event_constructor(),
            custom_event: window.custom_event_constructor(),
        }
    }
}

thread_local! {
    static AMBIENT: RefCell<Option<Globals>> = const { RefCell::new(None) };
}

/// The currently installed bindings, if any.
#[must_use]
pub fn current() -> Option<Globals> {
    AMBIENT.with_borrow(Clone::clone)
}

/// True while an environment is installed on this thread.
#[must_use]
pub fn is_installed() -> bool {
    AMBIENT.with_borrow(Option::is_some)
}

/// `window`
#[must_use]
pub fn window() -> Option<Window> {
    AMBIENT.with_borrow(|globals| globals.as_ref().map(|g| g.window.clone()))
}

/// `document`
#[must_use]
pub fn document() -> Option<Rc<RefCell<Document>>> {
    AMBIENT.with_borrow(|globals| globals.as_ref().map(|g| Rc::clone(&g.document)))
}

/// `localStorage`
#[must_use]
pub fn local_storage() -> Option<LocalStorage> {
    AMBIENT.with_borrow(|globals| globals.as_ref().map(|g| g.local_storage.clone()))
}

/// Swap the bindings, returning whatever was installed before.
pub(crate) fn replace(globals: Option<Globals>) -> Option<Globals> {
    AMBIENT.replace(globals)
}
