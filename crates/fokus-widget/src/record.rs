//! Persisted task records.
//!
//! The whole list lives under a single storage key as a JSON array of
//! `{ "descricao": string, "completa": bool }` objects.

use fokus_dom::LocalStorage;
use serde::{Deserialize, Serialize};

use crate::WidgetError;

/// Storage key holding the serialized task list.
pub const STORAGE_KEY: &str = "tarefas";

/// One task as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tarefa {
    /// Free-text description typed by the user.
    pub descricao: String,
    /// Set once a focus session finishes while the task is selected.
    #[serde(default)]
    pub completa: bool,
}

impl Tarefa {
    /// A new, incomplete task.
    #[must_use]
    pub fn new(descricao: impl Into<String>) -> Self {
        Self {
            descricao: descricao.into(),
            completa: false,
        }
    }
}

/// Reads and writes the task list in a [`LocalStorage`].
#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: LocalStorage,
}

impl TaskStore {
    /// Store backed by `storage` under [`STORAGE_KEY`].
    #[must_use]
    pub const fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// The persisted tasks; an absent key means no tasks.
    ///
    /// # Errors
    ///
    /// [`WidgetError::CorruptStorage`] if the stored value does not parse.
    pub fn load(&self) -> Result<Vec<Tarefa>, WidgetError> {
        let Some(raw) = self.storage.get_item(STORAGE_KEY) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| WidgetError::CorruptStorage {
            key: STORAGE_KEY.to_string(),
            source,
        })
    }

    /// Replace the persisted list.
    ///
    /// # Errors
    ///
    /// [`WidgetError::Serialize`] if serialization fails.
    pub fn save(&self, tarefas: &[Tarefa]) -> Result<(), WidgetError> {
        let json = serde_json::to_string(tarefas)?;
        tracing::trace!(count = tarefas.len(), "persisting tasks");
        self.storage.set_item(STORAGE_KEY, json);
        Ok(())
    }
}
