//! The Fokus widget, wired against [`fokus_dom`].
//!
//! Two independent pieces:
//!
//! - [`tasks`]: the task board. Tasks are added through a form, selected by
//!   clicking, completed when a `FocoFinalizado` event reaches the document,
//!   and persisted as JSON under [`STORAGE_KEY`].
//! - [`context`]: the timer context switcher (focus, short break, long
//!   break).
//!
//! Each piece can be mounted on an explicit document, or loaded from the
//! ambient [`fokus_dom::globals`] the way a page script would run.

pub mod context;
mod error;
mod record;
pub mod tasks;

use fokus_dom::{Document, NodeId, globals};

pub use context::Contexto;
pub use error::WidgetError;
pub use record::{STORAGE_KEY, Tarefa, TaskStore};
pub use tasks::TaskBoard;

/// Run the task script against the installed environment.
///
/// # Errors
///
/// [`WidgetError::GlobalsNotInstalled`] without an installed environment,
/// [`WidgetError::DocumentBusy`] if the document is borrowed, otherwise the
/// errors of [`tasks::mount`].
pub fn load_task_script() -> Result<TaskBoard, WidgetError> {
    let globals = globals::current().ok_or(WidgetError::GlobalsNotInstalled)?;
    let mut document = globals
        .document
        .try_borrow_mut()
        .map_err(|_| WidgetError::DocumentBusy)?;
    tasks::mount(&mut document, &globals.local_storage)
}

/// Run the context script against the installed environment.
///
/// # Errors
///
/// As [`load_task_script`], otherwise the errors of [`context::mount`].
pub fn load_context_script() -> Result<(), WidgetError> {
    let globals = globals::current().ok_or(WidgetError::GlobalsNotInstalled)?;
    let mut document = globals
        .document
        .try_borrow_mut()
        .map_err(|_| WidgetError::DocumentBusy)?;
    context::mount(&mut document)
}

/// First element matching `selector`, or [`WidgetError::MissingElement`].
pub(crate) fn required(document: &Document, selector: &str) -> Result<NodeId, WidgetError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| WidgetError::MissingElement(selector.to_string()))
}
