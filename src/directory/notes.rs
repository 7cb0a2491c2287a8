//! Private notes side store.
//!
//! Notes are deliberately kept out of the agent payload: they live only in a
//! parallel map keyed by agent id under their own storage key, and are merged
//! back onto in-memory records after every load.

use crate::error::ApiError;
use crate::store::{keys, load_json, save_json, LocalStore};
use crate::types::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Private notes for one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

impl AgentNotes {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none() && self.admin_notes.is_none()
    }
}

/// Store for the `agent id -> notes` map.
pub struct NotesStore {
    store: Arc<dyn LocalStore>,
}

impl NotesStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Load the full notes map. Corrupt state decodes to an empty map.
    pub fn load_all(&self) -> Result<HashMap<AgentId, AgentNotes>, ApiError> {
        Ok(load_json(self.store.as_ref(), keys::AGENT_NOTES)?.unwrap_or_default())
    }

    /// Write the notes for one agent. Empty notes delete the entry so the
    /// map never accumulates blank rows.
    pub fn save(&self, agent_id: &str, notes: &AgentNotes) -> Result<(), ApiError> {
        let mut map = self.load_all()?;
        if notes.is_empty() {
            map.remove(agent_id);
        } else {
            map.insert(agent_id.to_string(), notes.clone());
        }
        save_json(self.store.as_ref(), keys::AGENT_NOTES, &map)
    }

    /// Drop the notes entry for a deleted agent.
    pub fn remove(&self, agent_id: &str) -> Result<(), ApiError> {
        let mut map = self.load_all()?;
        if map.remove(agent_id).is_some() {
            save_json(self.store.as_ref(), keys::AGENT_NOTES, &map)?;
        }
        Ok(())
    }
}
