//! Local-store-backed agent repository.

use crate::directory::model::Agent;
use crate::directory::repository::AgentRepository;
use crate::error::ApiError;
use crate::store::{keys, load_json, save_json, LocalStore};
use std::sync::Arc;

/// Agent repository over the local key-value store.
///
/// The whole list is one JSON array under `oxo-agents`; at directory scale
/// that is cheaper than anything clever, and it keeps the persisted shape
/// identical to what earlier deployments wrote.
pub struct LocalAgentRepository {
    store: Arc<dyn LocalStore>,
}

impl LocalAgentRepository {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    fn save_all(&self, agents: &[Agent]) -> Result<(), ApiError> {
        save_json(self.store.as_ref(), keys::AGENTS, &agents)
    }
}

impl AgentRepository for LocalAgentRepository {
    fn list(&self) -> Result<Vec<Agent>, ApiError> {
        Ok(load_json(self.store.as_ref(), keys::AGENTS)?.unwrap_or_default())
    }

    fn create(&self, agent: &Agent) -> Result<(), ApiError> {
        let mut agents = self.list()?;
        agents.retain(|a| a.id != agent.id);
        agents.push(agent.clone());
        self.save_all(&agents)
    }

    fn update(&self, agent: &Agent) -> Result<(), ApiError> {
        let mut agents = self.list()?;
        let slot = agents
            .iter_mut()
            .find(|a| a.id == agent.id)
            .ok_or_else(|| ApiError::AgentNotFound(agent.id.clone()))?;
        *slot = agent.clone();
        self.save_all(&agents)
    }

    fn remove(&self, agent_id: &str) -> Result<(), ApiError> {
        let mut agents = self.list()?;
        let before = agents.len();
        agents.retain(|a| a.id != agent_id);
        if agents.len() != before {
            self.save_all(&agents)?;
        }
        Ok(())
    }
}
