//! Agent directory store.
//!
//! Single source of truth for the agent list and its filtered view. Holds the
//! in-memory aggregate and delegates persistence to the injected repository
//! and notes store.
//!
//! Failure policy, applied uniformly: a persistence or mirror failure never
//! blocks the in-memory mutation. The failure is logged, recorded as a soft
//! warning, and the operation reports success. Validation failures are the
//! only hard errors.

use crate::directory::filters::{apply_filters, AgentFilters};
use crate::directory::model::{Agent, AgentDraft};
use crate::directory::notes::{AgentNotes, NotesStore};
use crate::directory::repository::AgentRepository;
use crate::directory::validation::validate_draft;
use crate::error::ApiError;
use crate::store::{keys, load_json, save_json, LocalStore};
use crate::sync::RemoteMirror;
use chrono::Utc;
use std::sync::Arc;

pub struct AgentDirectory {
    agents: Vec<Agent>,
    filters: AgentFilters,
    filtered: Vec<Agent>,
    last_warning: Option<String>,
    repository: Arc<dyn AgentRepository>,
    notes: NotesStore,
    store: Arc<dyn LocalStore>,
    mirror: Option<RemoteMirror>,
}

impl AgentDirectory {
    /// Build a directory over the given persistence dependencies and load the
    /// current state. Persisted filters (if any) are restored.
    pub fn load(
        repository: Arc<dyn AgentRepository>,
        store: Arc<dyn LocalStore>,
        mirror: Option<RemoteMirror>,
    ) -> Self {
        let notes = NotesStore::new(Arc::clone(&store));
        let filters: AgentFilters = load_json(store.as_ref(), keys::AGENT_STORAGE)
            .ok()
            .flatten()
            .unwrap_or_default();
        let mut directory = Self {
            agents: Vec::new(),
            filters,
            filtered: Vec::new(),
            last_warning: None,
            repository,
            notes,
            store,
            mirror,
        };
        directory.reload();
        directory
    }

    /// Reload the agent list from the repository and re-merge private notes.
    ///
    /// A repository failure keeps the previous in-memory snapshot and sets a
    /// soft warning; it never fails hard.
    pub fn reload(&mut self) {
        match self.repository.list() {
            Ok(agents) => {
                self.agents = agents;
                self.merge_notes();
            }
            Err(e) => {
                tracing::warn!(error = %e, "agent list load failed, keeping cached snapshot");
                self.warn(format!("Could not load agents: {}", e));
            }
        }
        self.recompute();
    }

    fn merge_notes(&mut self) {
        let map = match self.notes.load_all() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "notes map load failed");
                self.warn(format!("Could not load notes: {}", e));
                return;
            }
        };
        for agent in &mut self.agents {
            if let Some(notes) = map.get(&agent.id) {
                agent.notes = notes.notes.clone();
                agent.admin_notes = notes.admin_notes.clone();
            } else {
                agent.notes = None;
                agent.admin_notes = None;
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = apply_filters(&self.agents, &self.filters);
    }

    fn warn(&mut self, message: String) {
        self.last_warning = Some(message);
    }

    /// Push the current public snapshot to the mirror, if one is configured.
    fn mirror_snapshot(&mut self) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        if let Err(e) = mirror.push_snapshot(&self.agents) {
            tracing::warn!(error = %e, "mirror push failed, local state unaffected");
            self.warn(format!("Saved locally; mirror push failed: {}", e));
        }
    }

    /// Create a new agent from a draft. Validation errors are hard failures;
    /// persistence failures degrade to a warning.
    pub fn add(&mut self, draft: AgentDraft) -> Result<Agent, ApiError> {
        validate_draft(&draft).into_api_result()?;
        let agent = draft.into_agent();
        self.agents.push(agent.clone());
        if let Err(e) = self.repository.create(&agent) {
            tracing::warn!(agent_id = %agent.id, error = %e, "agent create not persisted");
            self.warn(format!("Agent kept in memory only: {}", e));
        }
        self.mirror_snapshot();
        self.recompute();
        tracing::info!(agent_id = %agent.id, name = %agent.name, "agent created");
        Ok(agent)
    }

    /// Apply an edited record. The id must exist; private notes on the value
    /// are ignored (they only change through [`AgentDirectory::save_notes`]).
    pub fn update(&mut self, mut updated: Agent) -> Result<Agent, ApiError> {
        let slot = self
            .agents
            .iter_mut()
            .find(|a| a.id == updated.id)
            .ok_or_else(|| ApiError::AgentNotFound(updated.id.clone()))?;
        updated.notes = slot.notes.clone();
        updated.admin_notes = slot.admin_notes.clone();
        updated.last_activity = Some(Utc::now());
        *slot = updated.clone();
        if let Err(e) = self.repository.update(&updated) {
            tracing::warn!(agent_id = %updated.id, error = %e, "agent update not persisted");
            self.warn(format!("Update kept in memory only: {}", e));
        }
        self.mirror_snapshot();
        self.recompute();
        tracing::info!(agent_id = %updated.id, "agent updated");
        Ok(updated)
    }

    /// Delete an agent and its notes entry. Returns false when the id was
    /// not present. Delete-then-reload never resurrects the agent: the
    /// repository is the single delete path.
    pub fn remove(&mut self, agent_id: &str) -> Result<bool, ApiError> {
        let before = self.agents.len();
        self.agents.retain(|a| a.id != agent_id);
        if self.agents.len() == before {
            return Ok(false);
        }
        if let Err(e) = self.repository.remove(agent_id) {
            tracing::warn!(agent_id, error = %e, "agent delete not persisted");
            self.warn(format!("Delete applied in memory only: {}", e));
        }
        if let Err(e) = self.notes.remove(agent_id) {
            tracing::warn!(agent_id, error = %e, "notes cleanup failed");
        }
        self.mirror_snapshot();
        self.recompute();
        tracing::info!(agent_id, "agent removed");
        Ok(true)
    }

    /// Write private notes for an agent. This path never touches the agent
    /// payload or the mirror; notes are local by design.
    pub fn save_notes(&mut self, agent_id: &str, notes: AgentNotes) -> Result<(), ApiError> {
        let agent = self
            .agents
            .iter_mut()
            .find(|a| a.id == agent_id)
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))?;
        agent.notes = notes.notes.clone();
        agent.admin_notes = notes.admin_notes.clone();
        self.notes.save(agent_id, &notes)?;
        self.recompute();
        Ok(())
    }

    /// Replace the filter criteria, recompute the view, and persist the
    /// criteria slice so the next session starts where this one left off.
    pub fn set_filters(&mut self, filters: AgentFilters) {
        self.filters = filters;
        if let Err(e) = save_json(self.store.as_ref(), keys::AGENT_STORAGE, &self.filters) {
            tracing::warn!(error = %e, "filter slice not persisted");
        }
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(AgentFilters::default());
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn filtered(&self) -> &[Agent] {
        &self.filtered
    }

    pub fn filters(&self) -> &AgentFilters {
        &self.filters
    }

    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Take and clear the last soft warning, if any.
    pub fn take_warning(&mut self) -> Option<String> {
        self.last_warning.take()
    }
}
