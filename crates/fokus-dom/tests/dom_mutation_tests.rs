//! Tests for tree mutation: append, remove_child, remove, and the
//! single-parent invariant.

use fokus_dom::{Document, DomError, NodeId};
use quickcheck_macros::quickcheck;

/// Helper to create a detached element and return its NodeId.
fn element(doc: &mut Document, tag: &str) -> NodeId {
    doc.create_element(tag)
}

// ========== append ==========

#[test]
fn test_append_preserves_argument_order() {
    let mut doc = Document::new();
    let list = element(&mut doc, "ul");
    let a = element(&mut doc, "li");
    let b = element(&mut doc, "li");
    let c = element(&mut doc, "li");

    doc.append(list, &[a, b]).unwrap();
    doc.append(list, &[c]).unwrap();

    assert_eq!(doc.children(list), &[a, b, c]);
    assert_eq!(doc.parent(a), Some(list));
    assert_eq!(doc.parent(c), Some(list));
}

#[test]
fn test_append_moves_node_from_previous_parent() {
    let mut doc = Document::new();
    let from = element(&mut doc, "div");
    let to = element(&mut doc, "section");
    let child = element(&mut doc, "p");
    doc.append(doc.body(), &[from, to]).unwrap();
    doc.append(from, &[child]).unwrap();

    doc.append(to, &[child]).unwrap();

    assert!(doc.children(from).is_empty());
    assert_eq!(doc.children(to), &[child]);
    assert_eq!(doc.parent(child), Some(to));
}

#[test]
fn test_append_same_parent_moves_to_end() {
    let mut doc = Document::new();
    let list = element(&mut doc, "ul");
    let a = element(&mut doc, "li");
    let b = element(&mut doc, "li");
    doc.append(list, &[a, b]).unwrap();

    doc.append(list, &[a]).unwrap();

    assert_eq!(doc.children(list), &[b, a]);
}

#[test]
fn test_append_document_node_is_type_error() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");

    let err = doc.append(div, &[NodeId::DOCUMENT]).unwrap_err();

    assert!(matches!(err, DomError::NotAnElement(NodeId::DOCUMENT)));
}

#[test]
fn test_append_foreign_node_is_rejected() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");

    let err = doc.append(div, &[NodeId(999)]).unwrap_err();

    assert!(matches!(err, DomError::UnknownNode(NodeId(999))));
}

#[test]
fn test_append_into_own_descendant_is_rejected() {
    let mut doc = Document::new();
    let outer = element(&mut doc, "div");
    let inner = element(&mut doc, "div");
    doc.append(outer, &[inner]).unwrap();

    assert!(matches!(
        doc.append(inner, &[outer]),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        doc.append(outer, &[outer]),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert_eq!(doc.parent(inner), Some(outer));
    assert_eq!(doc.parent(outer), None);
}

#[test]
fn test_failed_append_moves_nothing() {
    let mut doc = Document::new();
    let list = element(&mut doc, "ul");
    let a = element(&mut doc, "li");

    assert!(doc.append(list, &[a, NodeId::DOCUMENT]).is_err());

    assert!(doc.children(list).is_empty());
    assert_eq!(doc.parent(a), None);
}

#[test]
fn test_root_cannot_be_appended_elsewhere() {
    let mut doc = Document::new();
    let div = element(&mut doc, "div");
    let body = doc.body();

    assert!(matches!(
        doc.append(div, &[body]),
        Err(DomError::HierarchyRequest { .. })
    ));
}

// ========== remove_child / remove ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut doc = Document::new();
    let parent = element(&mut doc, "div");
    let a = element(&mut doc, "a");
    let b = element(&mut doc, "b");
    let c = element(&mut doc, "c");
    doc.append(parent, &[a, b, c]).unwrap();

    doc.remove_child(parent, b).unwrap();

    assert_eq!(doc.children(parent), &[a, c]);
    assert_eq!(doc.parent(b), None);
}

#[test]
fn test_remove_child_of_non_child_is_noop() {
    let mut doc = Document::new();
    let parent = element(&mut doc, "div");
    let other = element(&mut doc, "div");
    let child = element(&mut doc, "p");
    doc.append(other, &[child]).unwrap();

    doc.remove_child(parent, child).unwrap();

    assert_eq!(doc.parent(child), Some(other));
    assert_eq!(doc.children(other), &[child]);
}

#[test]
fn test_remove_detaches_from_parent() {
    let mut doc = Document::new();
    let item = element(&mut doc, "li");
    doc.append(doc.body(), &[item]).unwrap();

    doc.remove(item).unwrap();

    assert!(doc.children(doc.body()).is_empty());
    assert_eq!(doc.parent(item), None);
    // Detached nodes stay usable and can be re-attached.
    doc.append(doc.body(), &[item]).unwrap();
    assert_eq!(doc.parent(item), Some(doc.body()));
}

#[test]
fn test_remove_root_and_detached_are_noops() {
    let mut doc = Document::new();
    let detached = element(&mut doc, "p");

    doc.remove(doc.body()).unwrap();
    doc.remove(detached).unwrap();

    assert_eq!(doc.query_selector("body").unwrap(), Some(doc.body()));
}

// ========== attributes ==========

#[test]
fn test_disabled_flag_ignores_value_and_resets_on_removal() {
    let mut doc = Document::new();
    let button = element(&mut doc, "button");
    let el = doc.element_mut(button).unwrap();
    assert!(!el.disabled());

    el.set_attribute("disabled", "false");
    assert!(el.disabled());
    assert_eq!(el.get_attribute("disabled"), Some("false"));

    el.set_attribute("disabled", "");
    assert!(el.disabled());

    el.remove_attribute("disabled");
    assert!(!el.disabled());
    assert!(!el.has_attribute("disabled"));

    // Removing again is a no-op.
    el.remove_attribute("disabled");
    assert!(!el.disabled());
}

#[test]
fn test_id_mirror_follows_set_and_remove() {
    let mut doc = Document::new();
    let node = element(&mut doc, "div");
    let el = doc.element_mut(node).unwrap();
    assert_eq!(el.id(), None);

    el.set_attribute("id", 7);
    assert_eq!(el.id(), Some("7"));
    assert_eq!(el.get_attribute("id"), Some("7"));

    el.set_attribute("id", "main");
    assert_eq!(el.id(), Some("main"));

    el.remove_attribute("id");
    assert_eq!(el.id(), None);
    assert!(!el.has_attribute("id"));
}

#[test]
fn test_set_attribute_coerces_values_to_strings() {
    let mut doc = Document::new();
    let node = element(&mut doc, "input");
    let el = doc.element_mut(node).unwrap();

    el.set_attribute("tabindex", 3);
    el.set_attribute("data-done", true);
    el.set_attribute("data-ratio", 0.5);

    assert_eq!(el.get_attribute("tabindex"), Some("3"));
    assert_eq!(el.get_attribute("data-done"), Some("true"));
    assert_eq!(el.get_attribute("data-ratio"), Some("0.5"));
    assert!(!el.disabled());
    assert_eq!(el.id(), None);
}

// ========== properties ==========

/// Replays a sequence of (node, parent) moves over a small pool of elements
/// and checks that every node sits in exactly its parent's child list.
#[quickcheck]
fn prop_parent_exclusivity(moves: Vec<(u8, u8)>) -> bool {
    const POOL: usize = 6;
    let mut doc = Document::new();
    let nodes: Vec<NodeId> = (0..POOL).map(|_| doc.create_element("div")).collect();

    for (child, parent) in moves {
        let child = nodes[usize::from(child) % POOL];
        let parent = nodes[usize::from(parent) % POOL];
        if child == parent {
            doc.remove(child).unwrap();
        } else {
            // Cycles are rejected; everything else must succeed.
            let _ = doc.append(parent, &[child]);
        }
    }

    nodes.iter().all(|&node| {
        let containers: Vec<NodeId> = nodes
            .iter()
            .copied()
            .filter(|&p| doc.children(p).contains(&node))
            .collect();
        let occurrences: usize = nodes
            .iter()
            .map(|&p| doc.children(p).iter().filter(|&&c| c == node).count())
            .sum();
        match doc.parent(node) {
            Some(parent) => containers == [parent] && occurrences == 1,
            None => containers.is_empty(),
        }
    })
}
