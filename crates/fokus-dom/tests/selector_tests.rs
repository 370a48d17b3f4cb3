//! Integration tests for selector matching and tree lookup.

use fokus_dom::{Document, DomError, NodeId, Selector};
use quickcheck_macros::quickcheck;

/// body
///   div.card#main
///     p.x
///     span
///       em.x
///   p.x.y
fn sample(doc: &mut Document) -> [NodeId; 5] {
    let card = doc.create_element("div");
    let para = doc.create_element("p");
    let span = doc.create_element("span");
    let em = doc.create_element("em");
    let tail = doc.create_element("p");

    let card_el = doc.element_mut(card).unwrap();
    card_el.class_list_mut().add(["card"]);
    card_el.set_attribute("id", "main");
    doc.element_mut(para).unwrap().class_list_mut().add(["x"]);
    doc.element_mut(em).unwrap().class_list_mut().add(["x"]);
    doc.element_mut(tail).unwrap().set_attribute("class", "x y");

    doc.append(span, &[em]).unwrap();
    doc.append(card, &[para, span]).unwrap();
    let body = doc.body();
    doc.append(body, &[card, tail]).unwrap();
    [card, para, span, em, tail]
}

#[test]
fn test_matches_each_form() {
    let mut doc = Document::new();
    let [card, para, ..] = sample(&mut doc);

    assert!(doc.matches(card, ".card").unwrap());
    assert!(doc.matches(card, "#main").unwrap());
    assert!(doc.matches(card, "div").unwrap());
    assert!(doc.matches(card, "DIV").unwrap());
    assert!(!doc.matches(para, "#main").unwrap());
    assert!(!doc.matches(para, ".card").unwrap());
}

#[test]
fn test_id_match_follows_attribute_removal() {
    let mut doc = Document::new();
    let [card, ..] = sample(&mut doc);

    doc.element_mut(card).unwrap().remove_attribute("id");

    assert!(!doc.matches(card, "#main").unwrap());
    assert_eq!(doc.element(card).unwrap().id(), None);
    assert_eq!(doc.query_selector("#main").unwrap(), None);
}

#[test]
fn test_query_selector_all_is_preorder() {
    let mut doc = Document::new();
    let [_, para, _, em, tail] = sample(&mut doc);

    assert_eq!(doc.query_selector_all(".x").unwrap(), vec![para, em, tail]);
    assert_eq!(doc.query_selector(".x").unwrap(), Some(para));
    assert_eq!(doc.query_selector("p").unwrap(), Some(para));
}

#[test]
fn test_element_scope_excludes_itself() {
    let mut doc = Document::new();
    let [card, _, span, em, _] = sample(&mut doc);

    assert_eq!(doc.query_selector_within(card, "div").unwrap(), None);
    assert_eq!(doc.query_selector_within(span, ".x").unwrap(), Some(em));
    assert_eq!(doc.query_selector_all_within(card, ".x").unwrap().len(), 2);
}

#[test]
fn test_document_scope_includes_root() {
    let mut doc = Document::new();
    let _ = sample(&mut doc);

    assert_eq!(doc.query_selector("body").unwrap(), Some(doc.body()));
    assert_eq!(doc.query_selector_all("BODY").unwrap(), vec![doc.body()]);

    let mut html = Document::with_root("html");
    let root = html.root();
    html.element_mut(root)
        .unwrap()
        .set_attribute("data-contexto", "foco");
    assert_eq!(html.query_selector("html").unwrap(), Some(root));
}

#[test]
fn test_detached_nodes_are_not_found() {
    let mut doc = Document::new();
    let [card, ..] = sample(&mut doc);

    doc.remove(card).unwrap();

    assert_eq!(doc.query_selector("#main").unwrap(), None);
    assert_eq!(doc.query_selector_all(".x").unwrap().len(), 1);
}

#[test]
fn test_no_match_is_none_not_error() {
    let doc = Document::new();

    assert_eq!(doc.query_selector(".missing").unwrap(), None);
    assert!(doc.query_selector_all("#missing").unwrap().is_empty());
}

#[test]
fn test_malformed_selector_is_error() {
    let doc = Document::new();

    for input in ["", "div p", "p.x", "[id]", "#"] {
        assert!(
            matches!(doc.query_selector(input), Err(DomError::InvalidSelector(_))),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_selector_display_round_trips() {
    for input in [".app__form-textarea", "#btn-remover-todas", "textarea"] {
        let selector: Selector = input.parse().unwrap();
        assert_eq!(selector.to_string(), input);
    }
}

/// Builds a tree from a list of parent picks and class flags, then checks
/// that `.x` finds exactly the flagged nodes in pre-order.
#[quickcheck]
fn prop_class_query_returns_flagged_nodes_in_tree_order(shape: Vec<(u8, bool)>) -> bool {
    let mut doc = Document::new();
    let mut nodes = vec![doc.body()];
    let mut flagged = Vec::new();

    for (parent_pick, has_class) in shape {
        let node = doc.create_element("div");
        if has_class {
            doc.element_mut(node).unwrap().class_list_mut().add(["x", "other"]);
            flagged.push(node);
        }
        let parent = nodes[usize::from(parent_pick) % nodes.len()];
        doc.append(parent, &[node]).unwrap();
        nodes.push(node);
    }

    // Reference pre-order walk.
    let mut expected = Vec::new();
    let mut stack = vec![doc.body()];
    while let Some(id) = stack.pop() {
        if flagged.contains(&id) {
            expected.push(id);
        }
        stack.extend(doc.children(id).iter().rev().copied());
    }

    doc.query_selector_all(".x").unwrap() == expected
}
