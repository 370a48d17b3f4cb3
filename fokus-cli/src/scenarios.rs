//! End-to-end scenarios driving the widget through a fresh environment.
//!
//! Every scenario builds its own [`DomEnvironment`](fokus_dom::DomEnvironment)
//! and installs it with a guard, so a failing scenario never leaks its
//! globals into the next one.

use anyhow::{Context, Result, bail, ensure};
use fokus_dom::{
    CustomEventInit, Document, Event, EventInit, NodeId, create_dom_environment, globals,
};
use fokus_widget::tasks::{FOCUS_FINISHED, ITEM_ACTIVE_CLASS, ITEM_CLASS, ITEM_COMPLETE_CLASS};
use fokus_widget::{Contexto, STORAGE_KEY, context, load_task_script};
use serde_json::Value;

/// A named scenario.
pub struct Scenario {
    /// Printed on the pass/fail line.
    pub name: &'static str,
    /// Scenario body.
    pub run: fn() -> Result<()>,
}

/// All scenarios, in run order.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "FocoFinalizado marks the selected task complete and persists it",
        run: focus_finished_completes_selected_task,
    },
    Scenario {
        name: "environments do not share document or storage",
        run: environments_are_isolated,
    },
    Scenario {
        name: "context buttons switch the timer context",
        run: context_buttons_switch_context,
    },
    Scenario {
        name: "remove buttons drop tasks from the list and storage",
        run: remove_buttons_drop_tasks,
    },
];

const DESCRIPTION: &str = "Estudar testes automatizados";

fn find(doc: &Document, selector: &str) -> Result<NodeId> {
    doc.query_selector(selector)?
        .with_context(|| format!("no element matches '{selector}'"))
}

/// Type `text` into the task form and submit it.
fn submit_task(doc: &mut Document, text: &str) -> Result<()> {
    let textarea = find(doc, ".app__form-textarea")?;
    doc.element_mut(textarea)?.set_value(text);
    let form = find(doc, ".app__form-add-task")?;
    let mut submit = Event::new(
        "submit",
        EventInit {
            bubbles: true,
            cancelable: true,
        },
    );
    let proceed = doc.dispatch_event(form, &mut submit)?;
    ensure!(!proceed, "the submit handler should prevent the default action");
    Ok(())
}

fn finish_focus(doc: &mut Document) -> Result<()> {
    let mut event = Event::custom(FOCUS_FINISHED, CustomEventInit::default());
    let _ = doc.dispatch_document_event(&mut event)?;
    Ok(())
}

fn focus_finished_completes_selected_task() -> Result<()> {
    let env = create_dom_environment()?;
    let _guard = env.install();
    let _board = load_task_script()?;

    let window = globals::window().context("window is not installed")?;
    let document = globals::document().context("document is not installed")?;
    let mut doc = document.borrow_mut();

    let textarea = find(&doc, ".app__form-textarea")?;
    doc.element_mut(textarea)?.set_value(DESCRIPTION);
    let form = find(&doc, ".app__form-add-task")?;
    let mut submit = window.new_event(
        "submit",
        EventInit {
            bubbles: true,
            cancelable: true,
        },
    );
    let _ = doc.dispatch_event(form, &mut submit)?;

    let item = doc
        .query_selector(&format!(".{ITEM_CLASS}"))?
        .context("submitting the form did not create a task")?;
    doc.click(item)?;

    let mut finished = window.new_custom_event(FOCUS_FINISHED, CustomEventInit::default());
    let _ = doc.dispatch_document_event(&mut finished)?;

    let classes = doc.element(item)?.class_list();
    ensure!(
        classes.contains(ITEM_COMPLETE_CLASS),
        "the selected task should be marked complete"
    );
    ensure!(
        !classes.contains(ITEM_ACTIVE_CLASS),
        "the selected task should no longer be active"
    );

    let button = doc
        .query_selector_within(item, "button")?
        .context("the task has no edit button")?;
    ensure!(
        doc.element(button)?.get_attribute("disabled") == Some("disabled"),
        "the edit button should be disabled"
    );

    let raw = window
        .local_storage()
        .get_item(STORAGE_KEY)
        .context("no tasks were persisted")?;
    let stored: Value = serde_json::from_str(&raw).context("persisted tasks are not JSON")?;
    let Some(stored) = stored.as_array() else {
        bail!("persisted tasks must be an array, got {stored}");
    };
    ensure!(
        stored.len() == 1,
        "expected exactly one persisted task, found {}",
        stored.len()
    );
    ensure!(
        stored[0]["descricao"] == DESCRIPTION,
        "unexpected description {}",
        stored[0]["descricao"]
    );
    ensure!(
        stored[0]["completa"] == true,
        "the persisted task should be complete"
    );
    Ok(())
}

fn environments_are_isolated() -> Result<()> {
    {
        let first = create_dom_environment()?;
        let _guard = first.install();
        let board = load_task_script()?;
        submit_task(&mut first.document().borrow_mut(), "primeira")?;
        ensure!(board.tarefas().len() == 1, "the first environment should hold a task");
    }
    ensure!(
        !globals::is_installed(),
        "globals outlived the first environment"
    );

    let second = create_dom_environment()?;
    let _guard = second.install();
    let board = load_task_script()?;
    ensure!(board.items().is_empty(), "tasks leaked into a fresh document");
    ensure!(
        second.local_storage().get_item(STORAGE_KEY).is_none(),
        "storage leaked into a fresh environment"
    );
    Ok(())
}

fn context_buttons_switch_context() -> Result<()> {
    let mut doc = Document::with_root("html");
    let root = doc.root();
    let mut children = Vec::new();
    for (tag, class) in [
        ("img", "app__image"),
        ("h1", "app__title"),
        ("button", "app__card-button app__card-button--foco active"),
        ("button", "app__card-button app__card-button--curto"),
        ("button", "app__card-button app__card-button--longo"),
    ] {
        let node = doc.create_element(tag);
        doc.element_mut(node)?.set_attribute("class", class);
        children.push(node);
    }
    doc.append(root, &children)?;
    context::mount(&mut doc)?;

    for contexto in [Contexto::DescansoLongo, Contexto::DescansoCurto, Contexto::Foco] {
        let button = find(&doc, contexto.button_selector())?;
        doc.click(button)?;

        let html = doc.element(root)?;
        ensure!(
            html.get_attribute(context::CONTEXT_ATTRIBUTE) == Some(contexto.as_ref()),
            "data-contexto should be {contexto}"
        );
        let banner = find(&doc, ".app__image")?;
        ensure!(
            doc.element(banner)?.get_attribute("src") == Some(contexto.banner_src().as_str()),
            "banner should show the {contexto} image"
        );
        let title = find(&doc, ".app__title")?;
        ensure!(
            doc.element(title)?.inner_html() == contexto.title_html(),
            "title should show the {contexto} headline"
        );
        let active = doc.query_selector_all(&format!(".{}", context::ACTIVE_CLASS))?;
        ensure!(
            active == [button],
            "only the {contexto} button should be active, found {active:?}"
        );
    }
    Ok(())
}

fn remove_buttons_drop_tasks() -> Result<()> {
    let env = create_dom_environment()?;
    let _guard = env.install();
    let board = load_task_script()?;
    let document = env.document();

    {
        let mut doc = document.borrow_mut();
        for text in ["feita", "pendente", "outra"] {
            submit_task(&mut doc, text)?;
        }
        let first = board
            .items()
            .first()
            .copied()
            .context("no task was rendered")?;
        doc.click(first)?;
        finish_focus(&mut doc)?;

        let remove_completed = find(&doc, "#btn-remover-concluidas")?;
        doc.click(remove_completed)?;
        ensure!(
            doc.query_selector(&format!(".{ITEM_COMPLETE_CLASS}"))?.is_none(),
            "completed tasks should be gone from the list"
        );
    }
    let pending: Vec<String> = board.tarefas().into_iter().map(|t| t.descricao).collect();
    ensure!(
        pending == ["pendente", "outra"],
        "unexpected remaining tasks {pending:?}"
    );

    let mut doc = document.borrow_mut();
    let remove_all = find(&doc, "#btn-remover-todas")?;
    doc.click(remove_all)?;
    ensure!(
        doc.query_selector_all(&format!(".{ITEM_CLASS}"))?.is_empty(),
        "the list should be empty"
    );
    ensure!(
        env.local_storage().get_item(STORAGE_KEY).as_deref() == Some("[]"),
        "storage should hold an empty task list"
    );
    Ok(())
}
