//! Error type for contract violations.
//!
//! Absence (a missing attribute, storage key or selector match) is reported
//! with `Option`, never with a [`DomError`].

use crate::NodeId;
use crate::event::ListenerError;

/// A contract violation raised synchronously at the call site.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// [§ 4.2.3 pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    /// Only elements can be appended.
    #[error("TypeError: node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// The insertion would put a node inside itself, detach the root
    /// element, or give the document a second root.
    #[error("HierarchyRequestError: cannot insert {child:?} into {parent:?}")]
    HierarchyRequest {
        /// The would-be parent.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },

    /// The ID was not allocated by this document.
    #[error("node {0:?} does not belong to this document")]
    UnknownNode(NodeId),

    /// The selector is not one of `.class`, `#id` or `tag`.
    #[error("SyntaxError: '{0}' is not a valid selector")]
    InvalidSelector(String),

    /// A listener returned an error; the dispatch pass stopped there.
    #[error("listener for '{event_type}' failed: {source}")]
    Listener {
        /// Type of the event being dispatched.
        event_type: String,
        /// The listener's error.
        #[source]
        source: ListenerError,
    },
}
