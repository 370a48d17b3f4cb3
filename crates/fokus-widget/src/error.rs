//! Widget error type.

use fokus_dom::DomError;

/// Errors raised while mounting the widget or handling its events.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    /// The markup the widget expects is not in the document.
    #[error("expected element matching '{0}' is missing from the document")]
    MissingElement(String),

    /// A script loader ran without an installed environment.
    #[error("no document environment is installed on this thread")]
    GlobalsNotInstalled,

    /// The ambient document is already borrowed elsewhere.
    #[error("the ambient document is already borrowed")]
    DocumentBusy,

    /// A document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The persisted task list is not valid JSON.
    #[error("stored value under '{key}' is not a task list: {source}")]
    CorruptStorage {
        /// Storage key that was read.
        key: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The task list could not be serialized.
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}
