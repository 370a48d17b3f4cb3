//! Per-test document environment.
//!
//! [`create_dom_environment`] builds a fresh [`Window`] whose document holds
//! the widget's initial markup. Installing it as ambient [`globals`] is an
//! explicit, reversible step: either the manual
//! [`DomEnvironment::apply_globals`] / [`DomEnvironment::cleanup`] pair, or
//! the scoped [`DomEnvironment::install`], whose guard restores the previous
//! bindings when dropped, including while unwinding from a failed assertion.
//!
//! [`globals`]: crate::globals

use std::cell::RefCell;
use std::rc::Rc;

use crate::globals::{self, Globals};
use crate::{Document, DomError, LocalStorage, Window};

/// A window, its document, and the install/cleanup operations.
#[derive(Debug)]
pub struct DomEnvironment {
    window: Window,
}

/// Build a document with the widget markup and wrap it in a new window.
///
/// The body contains, in order:
///
/// ```text
/// button.app__button--add-task
/// form.app__form-add-task.hidden
///   textarea.app__form-textarea
/// ul.app__section-task-list
/// p.app__section-active-task-description
/// button#btn-remover-concluidas
/// button#btn-remover-todas
/// ```
///
/// # Errors
///
/// Only if building the tree violates a tree invariant, which would be a bug.
pub fn create_dom_environment() -> Result<DomEnvironment, DomError> {
    let mut document = Document::new();
    build_base_structure(&mut document)?;
    Ok(DomEnvironment {
        window: Window::new(document),
    })
}

fn build_base_structure(document: &mut Document) -> Result<(), DomError> {
    let body = document.body();

    let add_task_button = document.create_element("button");
    document
        .element_mut(add_task_button)?
        .class_list_mut()
        .add(["app__button--add-task"]);

    let form = document.create_element("form");
    document
        .element_mut(form)?
        .class_list_mut()
        .add(["app__form-add-task", "hidden"]);
    let textarea = document.create_element("textarea");
    document
        .element_mut(textarea)?
        .class_list_mut()
        .add(["app__form-textarea"]);
    document.append(form, &[textarea])?;

    let task_list = document.create_element("ul");
    document
        .element_mut(task_list)?
        .class_list_mut()
        .add(["app__section-task-list"]);

    let active_task_description = document.create_element("p");
    document
        .element_mut(active_task_description)?
        .class_list_mut()
        .add(["app__section-active-task-description"]);

    let remove_completed = document.create_element("button");
    document
        .element_mut(remove_completed)?
        .set_attribute("id", "btn-remover-concluidas");

    let remove_all = document.create_element("button");
    document
        .element_mut(remove_all)?
        .set_attribute("id", "btn-remover-todas");

    document.append(
        body,
        &[
            add_task_button,
            form,
            task_list,
            active_task_description,
            remove_completed,
            remove_all,
        ],
    )
}

impl DomEnvironment {
    /// The window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The window's document.
    #[must_use]
    pub const fn document(&self) -> &Rc<RefCell<Document>> {
        self.window.document()
    }

    /// The window's `localStorage`.
    #[must_use]
    pub const fn local_storage(&self) -> &LocalStorage {
        self.window.local_storage()
    }

    /// Install `window`, `document`, `localStorage`, `Event` and
    /// `CustomEvent` as ambient globals, replacing whatever was there.
    ///
    /// Must be paired with [`DomEnvironment::cleanup`]; prefer
    /// [`DomEnvironment::install`] where the pairing has to survive a panic.
    pub fn apply_globals(&self) {
        let _ = globals::replace(Some(Globals::from_window(&self.window)));
        tracing::debug!("installed document environment globals");
    }

    /// Remove the ambient bindings installed by this environment.
    ///
    /// Bindings that belong to another environment are left alone.
    pub fn cleanup(&self) {
        let ours = globals::current().is_some_and(|g| g.window.same_window(&self.window));
        if ours {
            let _ = globals::replace(None);
            tracing::debug!("removed document environment globals");
        }
    }

    /// Scoped installation. The previous bindings (usually none) are
    /// snapshotted and put back exactly when the guard is dropped.
    #[must_use = "the globals are uninstalled as soon as the guard is dropped"]
    pub fn install(&self) -> GlobalsGuard {
        let previous = globals::replace(Some(Globals::from_window(&self.window)));
        tracing::debug!(nested = previous.is_some(), "installed scoped environment globals");
        GlobalsGuard { previous }
    }
}

/// Restores the ambient bindings that were in place before
/// [`DomEnvironment::install`].
#[derive(Debug)]
pub struct GlobalsGuard {
    previous: Option<Globals>,
}

impl Drop for GlobalsGuard {
    fn drop(&mut self) {
        let _ = globals::replace(self.previous.take());
        tracing::debug!("restored previous environment globals");
    }
}
