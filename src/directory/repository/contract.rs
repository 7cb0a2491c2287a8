//! Repository port for agent persistence.
//!
//! This trait is the only mutation path for the persisted agent list; no
//! caller bypasses it to touch the underlying store directly.

use crate::directory::model::Agent;
use crate::error::ApiError;

pub trait AgentRepository: Send + Sync {
    /// Full public agent list. Private notes are never part of this payload.
    fn list(&self) -> Result<Vec<Agent>, ApiError>;

    /// Persist a new agent. Replaces any existing record with the same id.
    fn create(&self, agent: &Agent) -> Result<(), ApiError>;

    /// Persist changes to an existing agent.
    fn update(&self, agent: &Agent) -> Result<(), ApiError>;

    /// Remove an agent by id. Removing an absent id succeeds (idempotent).
    fn remove(&self, agent_id: &str) -> Result<(), ApiError>;
}
