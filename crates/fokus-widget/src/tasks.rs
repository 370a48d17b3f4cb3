//! Task board: add, select, complete and remove tasks.
//!
//! Board state is shared between the handle returned by [`mount`] and the
//! listeners registered on the document. Listeners receive the document
//! as a parameter, so the state only stores node ids and records.

use std::cell::RefCell;
use std::rc::Rc;

use fokus_dom::{Document, Listener, LocalStorage, NodeId};

use crate::record::{Tarefa, TaskStore};
use crate::{WidgetError, required};

/// Custom event fired on the document when a focus session ends.
pub const FOCUS_FINISHED: &str = "FocoFinalizado";

/// Class of every rendered task.
pub const ITEM_CLASS: &str = "app__section-task-list-item";
/// Class of the selected task.
pub const ITEM_ACTIVE_CLASS: &str = "app__section-task-list-item-active";
/// Class of a completed task.
pub const ITEM_COMPLETE_CLASS: &str = "app__section-task-list-item-complete";

const ADD_TASK_BUTTON: &str = ".app__button--add-task";
const ADD_TASK_FORM: &str = ".app__form-add-task";
const TEXTAREA: &str = ".app__form-textarea";
const TASK_LIST: &str = ".app__section-task-list";
const ACTIVE_DESCRIPTION: &str = ".app__section-active-task-description";
const REMOVE_COMPLETED: &str = "#btn-remover-concluidas";
const REMOVE_ALL: &str = "#btn-remover-todas";

const DESCRIPTION_CLASS: &str = "app__section-task-list-item-description";
const EDIT_BUTTON_CLASS: &str = "app_button-edit";
const HIDDEN: &str = "hidden";
const EDIT_ICON: &str = "/imagens/edit.png";

const STATUS_ICON: &str = r##"<svg class="app__section-task-icon-status" width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="12" fill="#FFF"></circle><path d="M9 16.1719L19.5938 5.57812L21 6.98438L9 18.9844L3.42188 13.4062L4.82812 12L9 16.1719Z" fill="#01080E"></path></svg>"##;

#[derive(Debug)]
struct TaskItem {
    node: NodeId,
    tarefa: Tarefa,
}

#[derive(Debug)]
struct Board {
    store: TaskStore,
    items: Vec<TaskItem>,
    selected: Option<NodeId>,
    form: NodeId,
    textarea: NodeId,
    list: NodeId,
    description: NodeId,
}

impl Board {
    fn persist(&self) -> Result<(), WidgetError> {
        self.store.save(&self.tarefas())
    }

    fn tarefas(&self) -> Vec<Tarefa> {
        self.items.iter().map(|item| item.tarefa.clone()).collect()
    }

    fn item_mut(&mut self, node: NodeId) -> Option<&mut TaskItem> {
        self.items.iter_mut().find(|item| item.node == node)
    }
}

type SharedBoard = Rc<RefCell<Board>>;

/// Handle to a mounted task board.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    board: SharedBoard,
}

impl TaskBoard {
    /// Current records, in display order.
    #[must_use]
    pub fn tarefas(&self) -> Vec<Tarefa> {
        self.board.borrow().tarefas()
    }

    /// The `li` of every rendered task, in display order.
    #[must_use]
    pub fn items(&self) -> Vec<NodeId> {
        self.board.borrow().items.iter().map(|item| item.node).collect()
    }

    /// The selected task's `li`, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.board.borrow().selected
    }
}

/// Wire the task board into `document`, persisting to `storage`.
///
/// Records already stored under [`crate::STORAGE_KEY`] are rendered. A
/// stored value that does not parse is logged and replaced on the next
/// write.
///
/// # Errors
///
/// [`WidgetError::MissingElement`] if the expected markup is absent.
pub fn mount(document: &mut Document, storage: &LocalStorage) -> Result<TaskBoard, WidgetError> {
    let add_button = required(document, ADD_TASK_BUTTON)?;
    let form = required(document, ADD_TASK_FORM)?;
    let textarea = required(document, TEXTAREA)?;
    let list = required(document, TASK_LIST)?;
    let description = required(document, ACTIVE_DESCRIPTION)?;
    let remove_completed = required(document, REMOVE_COMPLETED)?;
    let remove_all = required(document, REMOVE_ALL)?;

    let store = TaskStore::new(storage.clone());
    let stored = store.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable task list");
        Vec::new()
    });

    let board: SharedBoard = Rc::new(RefCell::new(Board {
        store,
        items: Vec::with_capacity(stored.len()),
        selected: None,
        form,
        textarea,
        list,
        description,
    }));

    document.add_event_listener(
        add_button,
        "click",
        Listener::new(move |doc, _| {
            let _ = doc.element_mut(form)?.class_list_mut().toggle(HIDDEN);
            Ok(())
        }),
    )?;

    let on_submit = Rc::clone(&board);
    document.add_event_listener(
        form,
        "submit",
        Listener::new(move |doc, event| {
            event.prevent_default();
            submit(&on_submit, doc)?;
            Ok(())
        }),
    )?;

    let on_finished = Rc::clone(&board);
    document.add_document_listener(
        FOCUS_FINISHED,
        Listener::new(move |doc, _| {
            complete_selected(&on_finished, doc)?;
            Ok(())
        }),
    );

    for (button, only_completed) in [(remove_completed, true), (remove_all, false)] {
        let on_remove = Rc::clone(&board);
        document.add_event_listener(
            button,
            "click",
            Listener::new(move |doc, _| {
                remove_tasks(&on_remove, doc, only_completed)?;
                Ok(())
            }),
        )?;
    }

    for tarefa in stored {
        let _ = render(&board, document, tarefa)?;
    }

    tracing::debug!(tasks = board.borrow().items.len(), "task board mounted");
    Ok(TaskBoard { board })
}

fn submit(board: &SharedBoard, doc: &mut Document) -> Result<(), WidgetError> {
    let (form, textarea) = {
        let board = board.borrow();
        (board.form, board.textarea)
    };

    let descricao = doc.element(textarea)?.value().to_string();
    if descricao.trim().is_empty() {
        tracing::debug!("ignoring blank task description");
        return Ok(());
    }

    let _ = render(board, doc, Tarefa::new(descricao))?;
    board.borrow().persist()?;

    doc.element_mut(textarea)?.set_value("");
    doc.element_mut(form)?.class_list_mut().add([HIDDEN]);
    Ok(())
}

/// Build the `li` for `tarefa`, append it to the list and track it.
fn render(board: &SharedBoard, doc: &mut Document, tarefa: Tarefa) -> Result<NodeId, WidgetError> {
    let li = doc.create_element("li");
    doc.element_mut(li)?.class_list_mut().add([ITEM_CLASS]);

    let icon = doc.create_element("svg");
    doc.element_mut(icon)?.set_inner_html(STATUS_ICON);

    let paragraph = doc.create_element("p");
    let paragraph_el = doc.element_mut(paragraph)?;
    paragraph_el.class_list_mut().add([DESCRIPTION_CLASS]);
    paragraph_el.set_text_content(&tarefa.descricao);

    let button = doc.create_element("button");
    doc.element_mut(button)?.class_list_mut().add([EDIT_BUTTON_CLASS]);
    let image = doc.create_element("img");
    doc.element_mut(image)?.set_attribute("src", EDIT_ICON);
    doc.append(button, &[image])?;

    doc.append(li, &[icon, paragraph, button])?;

    if tarefa.completa {
        doc.element_mut(li)?.class_list_mut().add([ITEM_COMPLETE_CLASS]);
        doc.element_mut(button)?.set_attribute("disabled", "disabled");
    } else {
        let on_click = Rc::clone(board);
        doc.set_onclick(
            li,
            Some(Listener::new(move |doc, _| {
                select(&on_click, doc, li)?;
                Ok(())
            })),
        )?;
    }

    let list = board.borrow().list;
    doc.append(list, &[li])?;
    board.borrow_mut().items.push(TaskItem { node: li, tarefa });
    tracing::trace!(?li, "task rendered");
    Ok(li)
}

fn select(board: &SharedBoard, doc: &mut Document, li: NodeId) -> Result<(), WidgetError> {
    let mut board = board.borrow_mut();

    for active in doc.query_selector_all(&format!(".{ITEM_ACTIVE_CLASS}"))? {
        doc.element_mut(active)?
            .class_list_mut()
            .remove([ITEM_ACTIVE_CLASS]);
    }

    let description = board.description;
    if board.selected == Some(li) {
        board.selected = None;
        doc.element_mut(description)?.set_text_content("");
        return Ok(());
    }

    let Some(item) = board.item_mut(li) else {
        return Ok(());
    };
    let descricao = item.tarefa.descricao.clone();
    board.selected = Some(li);
    doc.element_mut(description)?.set_text_content(descricao);
    doc.element_mut(li)?.class_list_mut().add([ITEM_ACTIVE_CLASS]);
    Ok(())
}

fn complete_selected(board: &SharedBoard, doc: &mut Document) -> Result<(), WidgetError> {
    let mut board = board.borrow_mut();
    let Some(li) = board.selected.take() else {
        return Ok(());
    };
    let Some(item) = board.item_mut(li) else {
        return Ok(());
    };
    item.tarefa.completa = true;

    let mut classes = doc.element_mut(li)?.class_list_mut();
    classes.remove([ITEM_ACTIVE_CLASS]);
    classes.add([ITEM_COMPLETE_CLASS]);
    if let Some(button) = doc.query_selector_within(li, "button")? {
        doc.element_mut(button)?.set_attribute("disabled", "disabled");
    }
    doc.set_onclick(li, None)?;
    doc.element_mut(board.description)?.set_text_content("");

    tracing::debug!(?li, "task completed");
    board.persist()
}

fn remove_tasks(
    board: &SharedBoard,
    doc: &mut Document,
    only_completed: bool,
) -> Result<(), WidgetError> {
    let mut board = board.borrow_mut();
    let class = if only_completed {
        ITEM_COMPLETE_CLASS
    } else {
        ITEM_CLASS
    };

    let doomed = doc.query_selector_all_within(board.list, &format!(".{class}"))?;
    for &node in &doomed {
        doc.remove(node)?;
    }
    board.items.retain(|item| !doomed.contains(&item.node));

    if board.selected.is_some_and(|selected| doomed.contains(&selected)) {
        board.selected = None;
        doc.element_mut(board.description)?.set_text_content("");
    }

    tracing::debug!(removed = doomed.len(), only_completed, "tasks removed");
    board.persist()
}
