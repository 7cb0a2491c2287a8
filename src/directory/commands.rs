//! Directory command service: single entry point per agent CLI command
//! variant. Owns the workflow logic; the CLI parses, calls one method per
//! variant, and formats the result structs.

use crate::directory::filters::{sort_agents, AgentFilters, SortKey, SortOrder};
use crate::directory::model::{Agent, AgentDraft, AgentStatus, Platform};
use crate::directory::notes::AgentNotes;
use crate::directory::registry::AgentDirectory;
use crate::error::ApiError;
use serde::Serialize;

pub struct DirectoryCommandService;

/// One row in the agent list output.
#[derive(Debug, Clone, Serialize)]
pub struct AgentListItem {
    pub id: String,
    pub name: String,
    pub platform: Option<String>,
    pub category: Option<String>,
    pub status: String,
    pub rating: f32,
    pub verified: bool,
}

/// Result of agent list command.
#[derive(Debug, Clone, Serialize)]
pub struct AgentListResult {
    pub total: usize,
    pub shown: usize,
    pub agents: Vec<AgentListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of agent show command: the full record plus private notes.
#[derive(Debug, Clone)]
pub struct AgentShowResult {
    pub agent: Agent,
}

/// Result of agent create command.
#[derive(Debug, Clone)]
pub struct AgentCreateResult {
    pub agent: Agent,
    pub warning: Option<String>,
}

/// Result of agent edit command.
#[derive(Debug, Clone)]
pub struct AgentEditResult {
    pub agent: Agent,
    pub warning: Option<String>,
}

/// Result of agent remove command.
#[derive(Debug, Clone)]
pub struct AgentRemoveResult {
    pub agent_id: String,
    pub removed: bool,
    pub warning: Option<String>,
}

/// Result of a notes read or write.
#[derive(Debug, Clone)]
pub struct NotesResult {
    pub agent_id: String,
    pub notes: AgentNotes,
}

/// Flag-shaped edits applied over an existing record.
#[derive(Debug, Clone, Default)]
pub struct AgentFieldEdits {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub about: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub status: Option<AgentStatus>,
    pub rating: Option<f32>,
    pub verified: Option<bool>,
}

impl DirectoryCommandService {
    /// List agents through the directory's filtered view, then sort.
    pub fn list(
        directory: &mut AgentDirectory,
        filters: AgentFilters,
        sort: SortKey,
        order: SortOrder,
    ) -> Result<AgentListResult, ApiError> {
        directory.set_filters(filters);
        let total = directory.agents().len();
        let mut agents: Vec<Agent> = directory.filtered().to_vec();
        sort_agents(&mut agents, sort, order);
        let items = agents
            .iter()
            .map(|a| AgentListItem {
                id: a.id.clone(),
                name: a.name.clone(),
                platform: a.platform.map(|p| p.as_str().to_string()),
                category: a.category.clone(),
                status: a.status.as_str().to_string(),
                rating: a.rating,
                verified: a.is_verified,
            })
            .collect::<Vec<_>>();
        Ok(AgentListResult {
            total,
            shown: items.len(),
            agents: items,
            warning: directory.take_warning(),
        })
    }

    /// Show one agent, private notes included.
    pub fn show(directory: &AgentDirectory, agent_id: &str) -> Result<AgentShowResult, ApiError> {
        let agent = directory
            .get(agent_id)
            .cloned()
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))?;
        Ok(AgentShowResult { agent })
    }

    /// Create an agent from a draft.
    pub fn create(
        directory: &mut AgentDirectory,
        draft: AgentDraft,
    ) -> Result<AgentCreateResult, ApiError> {
        let agent = directory.add(draft)?;
        Ok(AgentCreateResult {
            agent,
            warning: directory.take_warning(),
        })
    }

    /// Apply flag-shaped edits to an existing agent.
    pub fn edit(
        directory: &mut AgentDirectory,
        agent_id: &str,
        edits: AgentFieldEdits,
    ) -> Result<AgentEditResult, ApiError> {
        let mut agent = directory
            .get(agent_id)
            .cloned()
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))?;

        if let Some(name) = edits.name {
            agent.name = name;
        }
        if let Some(identifier) = edits.identifier {
            agent.identifier = Some(identifier);
        }
        if let Some(about) = edits.about {
            agent.about = Some(about);
        }
        if let Some(phone) = edits.phone_number {
            agent.phone_number = Some(phone);
        }
        if let Some(email) = edits.email {
            agent.email = Some(email);
        }
        if let Some(url) = edits.website_url {
            agent.website_url = Some(url);
        }
        if let Some(platform) = edits.platform {
            agent.platform = Some(platform);
        }
        if let Some(category) = edits.category {
            agent.category = Some(category);
        }
        if let Some(specialties) = edits.specialties {
            agent.specialties = specialties;
        }
        if let Some(languages) = edits.languages {
            agent.languages = languages;
        }
        if let Some(status) = edits.status {
            agent.status = status;
        }
        if let Some(rating) = edits.rating {
            agent.rating = rating;
        }
        if let Some(verified) = edits.verified {
            agent.is_verified = verified;
        }

        // Re-validate the edited record through the draft checks.
        let draft = AgentDraft {
            name: agent.name.clone(),
            identifier: agent.identifier.clone(),
            about: agent.about.clone(),
            phone_number: agent.phone_number.clone(),
            email: agent.email.clone(),
            website_url: agent.website_url.clone(),
            platform: agent.platform,
            category: agent.category.clone(),
            specialties: agent.specialties.clone(),
            languages: agent.languages.clone(),
            status: Some(agent.status),
            rating: Some(agent.rating),
            is_verified: agent.is_verified,
        };
        crate::directory::validation::validate_draft(&draft).into_api_result()?;

        let agent = directory.update(agent)?;
        Ok(AgentEditResult {
            agent,
            warning: directory.take_warning(),
        })
    }

    /// Remove an agent. Confirmation is the CLI's concern; this always acts.
    pub fn remove(
        directory: &mut AgentDirectory,
        agent_id: &str,
    ) -> Result<AgentRemoveResult, ApiError> {
        let removed = directory.remove(agent_id)?;
        if !removed {
            return Err(ApiError::AgentNotFound(agent_id.to_string()));
        }
        Ok(AgentRemoveResult {
            agent_id: agent_id.to_string(),
            removed,
            warning: directory.take_warning(),
        })
    }

    /// Read private notes for an agent.
    pub fn notes(directory: &AgentDirectory, agent_id: &str) -> Result<NotesResult, ApiError> {
        let agent = directory
            .get(agent_id)
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))?;
        Ok(NotesResult {
            agent_id: agent_id.to_string(),
            notes: AgentNotes {
                notes: agent.notes.clone(),
                admin_notes: agent.admin_notes.clone(),
            },
        })
    }

    /// Write private notes for an agent. `None` fields are left untouched;
    /// pass an empty string to clear one.
    pub fn set_notes(
        directory: &mut AgentDirectory,
        agent_id: &str,
        notes: Option<String>,
        admin_notes: Option<String>,
    ) -> Result<NotesResult, ApiError> {
        let current = Self::notes(directory, agent_id)?.notes;
        let merge = |new: Option<String>, old: Option<String>| match new {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(v),
            None => old,
        };
        let next = AgentNotes {
            notes: merge(notes, current.notes),
            admin_notes: merge(admin_notes, current.admin_notes),
        };
        directory.save_notes(agent_id, next.clone())?;
        Ok(NotesResult {
            agent_id: agent_id.to_string(),
            notes: next,
        })
    }
}
