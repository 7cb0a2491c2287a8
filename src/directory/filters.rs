//! Filter criteria and the pure filter/sort functions over agent lists.
//!
//! Filtering is conjunctive: every active predicate must hold. Sorting is a
//! separate concern applied by the command layer, never inside the filter.

use crate::directory::model::{Agent, AgentStatus, Platform};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Transient filter criteria over the agent list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
    #[serde(default)]
    pub verified_only: bool,
}

impl AgentFilters {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.platform.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.min_rating.is_none()
            && !self.verified_only
    }

    /// Whether `agent` satisfies every active predicate.
    pub fn matches(&self, agent: &Agent) -> bool {
        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !search_haystack(agent, &needle) {
                return false;
            }
        }
        if let Some(platform) = self.platform {
            if agent.platform != Some(platform) {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref() {
            let matches = agent
                .category
                .as_deref()
                .map_or(false, |c| c.eq_ignore_ascii_case(category));
            if !matches {
                return false;
            }
        }
        if let Some(status) = self.status {
            if agent.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if agent.rating < min {
                return false;
            }
        }
        if self.verified_only && !agent.is_verified {
            return false;
        }
        true
    }
}

/// Case-insensitive substring search across the public text fields plus the
/// locally merged private notes.
fn search_haystack(agent: &Agent, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field.map_or(false, |v| v.to_lowercase().contains(needle))
    };
    agent.name.to_lowercase().contains(needle)
        || contains(agent.identifier.as_deref())
        || contains(agent.email.as_deref())
        || contains(agent.about.as_deref())
        || contains(agent.website_url.as_deref())
        || contains(agent.notes.as_deref())
        || agent
            .specialties
            .iter()
            .any(|s| s.to_lowercase().contains(needle))
        || agent
            .languages
            .iter()
            .any(|l| l.to_lowercase().contains(needle))
}

/// Pure filter over `(agents, filters)`. Empty filters return the whole list.
pub fn apply_filters(agents: &[Agent], filters: &AgentFilters) -> Vec<Agent> {
    agents
        .iter()
        .filter(|agent| filters.matches(agent))
        .cloned()
        .collect()
}

/// Sort key for list output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Created,
    Platform,
    Rating,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "created" => Ok(SortKey::Created),
            "platform" => Ok(SortKey::Platform),
            "rating" => Ok(SortKey::Rating),
            _ => Err(format!(
                "Unknown sort key: {} (expected name, created, platform, or rating)",
                s
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {} (expected asc or desc)", s)),
        }
    }
}

/// Sort agents in place by the given key and order.
pub fn sort_agents(agents: &mut [Agent], key: SortKey, order: SortOrder) {
    agents.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Platform => {
                let pa = a.platform.map(|p| p.as_str()).unwrap_or("");
                let pb = b.platform.map(|p| p.as_str()).unwrap_or("");
                pa.cmp(pb)
            }
            SortKey::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(Ordering::Equal),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
