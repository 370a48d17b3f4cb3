//! Task board behavior against an explicitly passed document.

use fokus_dom::{
    CustomEventInit, Document, DomEnvironment, Event, EventInit, NodeId, create_dom_environment,
};
use fokus_widget::tasks::{self, ITEM_ACTIVE_CLASS, ITEM_CLASS, ITEM_COMPLETE_CLASS};
use fokus_widget::{STORAGE_KEY, Tarefa, TaskBoard, TaskStore, WidgetError};
use quickcheck_macros::quickcheck;

fn mounted() -> (DomEnvironment, TaskBoard) {
    let env = create_dom_environment().unwrap();
    let board = tasks::mount(&mut env.document().borrow_mut(), env.local_storage()).unwrap();
    (env, board)
}

fn node(env: &DomEnvironment, selector: &str) -> NodeId {
    env.document()
        .borrow()
        .query_selector(selector)
        .unwrap()
        .unwrap()
}

fn add_task(env: &DomEnvironment, text: &str) {
    let textarea = node(env, ".app__form-textarea");
    let form = node(env, ".app__form-add-task");
    let mut doc = env.document().borrow_mut();
    doc.element_mut(textarea).unwrap().set_value(text);
    let mut submit = Event::new(
        "submit",
        EventInit {
            bubbles: true,
            cancelable: true,
        },
    );
    let _ = doc.dispatch_event(form, &mut submit).unwrap();
    assert!(submit.default_prevented());
}

fn click(env: &DomEnvironment, id: NodeId) {
    env.document().borrow_mut().click(id).unwrap();
}

fn finish_focus(env: &DomEnvironment) {
    let mut event = Event::custom("FocoFinalizado", CustomEventInit::default());
    let _ = env
        .document()
        .borrow_mut()
        .dispatch_document_event(&mut event)
        .unwrap();
}

fn has_class(env: &DomEnvironment, id: NodeId, class: &str) -> bool {
    env.document()
        .borrow()
        .element(id)
        .unwrap()
        .class_list()
        .contains(class)
}

fn stored(env: &DomEnvironment) -> Vec<Tarefa> {
    TaskStore::new(env.local_storage().clone()).load().unwrap()
}

#[test]
fn test_add_button_toggles_form() {
    let (env, _board) = mounted();
    let button = node(&env, ".app__button--add-task");
    let form = node(&env, ".app__form-add-task");

    click(&env, button);
    assert!(!has_class(&env, form, "hidden"));
    click(&env, button);
    assert!(has_class(&env, form, "hidden"));
}

#[test]
fn test_submit_renders_task_and_resets_form() {
    let (env, board) = mounted();
    click(&env, node(&env, ".app__button--add-task"));

    add_task(&env, "Estudar Rust");

    let form = node(&env, ".app__form-add-task");
    let textarea = node(&env, ".app__form-textarea");
    let item = node(&env, &format!(".{ITEM_CLASS}"));
    let doc = env.document().borrow();

    assert_eq!(doc.parent(item), Some(node(&env, ".app__section-task-list")));
    let parts: Vec<&str> = doc
        .children(item)
        .iter()
        .map(|&child| doc.element(child).unwrap().tag_name())
        .collect();
    assert_eq!(parts, ["SVG", "P", "BUTTON"]);

    let paragraph = doc
        .query_selector_within(item, ".app__section-task-list-item-description")
        .unwrap()
        .unwrap();
    assert_eq!(doc.element(paragraph).unwrap().text_content(), "Estudar Rust");
    let button = doc.query_selector_within(item, ".app_button-edit").unwrap().unwrap();
    assert!(!doc.element(button).unwrap().has_attribute("disabled"));
    let image = doc.query_selector_within(button, "img").unwrap().unwrap();
    assert_eq!(
        doc.element(image).unwrap().get_attribute("src"),
        Some("/imagens/edit.png")
    );

    assert_eq!(doc.element(textarea).unwrap().value(), "");
    assert!(doc.element(form).unwrap().class_list().contains("hidden"));
    assert_eq!(board.items(), vec![item]);
    assert_eq!(stored(&env), vec![Tarefa::new("Estudar Rust")]);
}

#[test]
fn test_blank_description_is_ignored() {
    let (env, board) = mounted();

    add_task(&env, "   \n");

    assert!(board.items().is_empty());
    assert_eq!(env.local_storage().get_item(STORAGE_KEY), None);
}

#[test]
fn test_selection_is_exclusive_and_toggles() {
    let (env, board) = mounted();
    add_task(&env, "a");
    add_task(&env, "b");
    let items = board.items();
    assert_eq!(items.len(), 2);
    let (a, b) = (items[0], items[1]);
    let description = node(&env, ".app__section-active-task-description");
    let text = |env: &DomEnvironment| {
        env.document()
            .borrow()
            .element(description)
            .unwrap()
            .text_content()
            .to_string()
    };

    click(&env, a);
    assert!(has_class(&env, a, ITEM_ACTIVE_CLASS));
    assert_eq!(text(&env), "a");

    click(&env, b);
    assert!(!has_class(&env, a, ITEM_ACTIVE_CLASS));
    assert!(has_class(&env, b, ITEM_ACTIVE_CLASS));
    assert_eq!(board.selected(), Some(b));
    assert_eq!(text(&env), "b");

    click(&env, b);
    assert!(!has_class(&env, b, ITEM_ACTIVE_CLASS));
    assert_eq!(board.selected(), None);
    assert_eq!(text(&env), "");
}

#[test]
fn test_completed_task_cannot_be_selected() {
    let (env, board) = mounted();
    add_task(&env, "a");
    let a = board.items()[0];

    click(&env, a);
    finish_focus(&env);
    assert_eq!(board.selected(), None);

    click(&env, a);
    assert!(!has_class(&env, a, ITEM_ACTIVE_CLASS));
    assert!(has_class(&env, a, ITEM_COMPLETE_CLASS));
    assert_eq!(board.selected(), None);
}

#[test]
fn test_remove_completed_keeps_pending_tasks() {
    let (env, board) = mounted();
    add_task(&env, "feita");
    add_task(&env, "pendente");
    let done = board.items()[0];
    click(&env, done);
    finish_focus(&env);

    click(&env, node(&env, "#btn-remover-concluidas"));

    let remaining = board.items();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0], done);
    assert_eq!(env.document().borrow().parent(done), None);
    assert_eq!(stored(&env), vec![Tarefa::new("pendente")]);
}

#[test]
fn test_remove_all_clears_list_and_selection() {
    let (env, board) = mounted();
    add_task(&env, "a");
    add_task(&env, "b");
    click(&env, board.items()[1]);

    click(&env, node(&env, "#btn-remover-todas"));

    let list = node(&env, ".app__section-task-list");
    assert!(env.document().borrow().children(list).is_empty());
    assert_eq!(board.selected(), None);
    assert!(stored(&env).is_empty());
    assert_eq!(env.local_storage().get_item(STORAGE_KEY).as_deref(), Some("[]"));
}

#[test]
fn test_mount_renders_stored_tasks() {
    let env = create_dom_environment().unwrap();
    env.local_storage().set_item(
        STORAGE_KEY,
        r#"[{"descricao":"velha","completa":true},{"descricao":"nova"}]"#,
    );

    let board = tasks::mount(&mut env.document().borrow_mut(), env.local_storage()).unwrap();

    let items = board.items();
    assert_eq!(items.len(), 2);
    assert!(has_class(&env, items[0], ITEM_COMPLETE_CLASS));
    assert!(!has_class(&env, items[1], ITEM_COMPLETE_CLASS));
    let doc = env.document().borrow();
    let button = doc.query_selector_within(items[0], "button").unwrap().unwrap();
    assert_eq!(
        doc.element(button).unwrap().get_attribute("disabled"),
        Some("disabled")
    );
    assert_eq!(
        board.tarefas(),
        vec![
            Tarefa {
                descricao: "velha".into(),
                completa: true,
            },
            Tarefa::new("nova"),
        ]
    );
}

#[test]
fn test_corrupt_storage_starts_empty_and_is_replaced() {
    let env = create_dom_environment().unwrap();
    env.local_storage().set_item(STORAGE_KEY, "{not json");

    let board = tasks::mount(&mut env.document().borrow_mut(), env.local_storage()).unwrap();
    assert!(board.items().is_empty());

    add_task(&env, "recomeço");
    assert_eq!(stored(&env), vec![Tarefa::new("recomeço")]);
}

#[test]
fn test_mount_requires_markup() {
    let env = create_dom_environment().unwrap();
    let mut bare = Document::new();

    let err = tasks::mount(&mut bare, env.local_storage()).unwrap_err();

    assert!(matches!(err, WidgetError::MissingElement(ref s) if s == ".app__button--add-task"));
}

/// Every non-blank submission is persisted, in submission order.
#[quickcheck]
fn prop_submissions_persist_in_order(descriptions: Vec<String>) -> bool {
    let (env, board) = mounted();
    for text in &descriptions {
        add_task(&env, text);
    }

    let expected: Vec<Tarefa> = descriptions
        .iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| Tarefa::new(text.as_str()))
        .collect();
    let persisted = if expected.is_empty() {
        env.local_storage().get_item(STORAGE_KEY).is_none()
    } else {
        stored(&env) == expected
    };
    persisted && board.tarefas() == expected && board.items().len() == expected.len()
}
