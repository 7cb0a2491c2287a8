//! Agent record and enumerations.
//!
//! The serialized shape (camelCase fields, lowercase enum strings) is the
//! wire format of the persisted agent list and must stay compatible with
//! data written by earlier deployments.

use crate::types::AgentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Messaging platform an agent is reachable on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Whatsapp,
    Wechat,
    Telegram,
    Instagram,
    Tiktok,
    Discord,
    Signal,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Wechat => "wechat",
            Platform::Telegram => "telegram",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Discord => "discord",
            Platform::Signal => "signal",
        }
    }

    /// All known platforms, for CLI help and validation messages.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Whatsapp,
            Platform::Wechat,
            Platform::Telegram,
            Platform::Instagram,
            Platform::Tiktok,
            Platform::Discord,
            Platform::Signal,
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" => Ok(Platform::Whatsapp),
            "wechat" => Ok(Platform::Wechat),
            "telegram" => Ok(Platform::Telegram),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            "discord" => Ok(Platform::Discord),
            "signal" => Ok(Platform::Signal),
            _ => Err(format!(
                "Unknown platform: {} (expected one of: whatsapp, wechat, telegram, instagram, tiktok, discord, signal)",
                s
            )),
        }
    }
}

/// Directory status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Inactive => "inactive",
            AgentStatus::Suspended => "suspended",
            AgentStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AgentStatus::Active),
            "inactive" => Ok(AgentStatus::Inactive),
            "suspended" => Ok(AgentStatus::Suspended),
            "pending" => Ok(AgentStatus::Pending),
            _ => Err(format!(
                "Unknown status: {} (expected one of: active, inactive, suspended, pending)",
                s
            )),
        }
    }
}

/// Contactable intermediary in the directory.
///
/// `notes` and `admin_notes` are private, in-memory-only fields: `serde(skip)`
/// keeps them out of every persisted or pushed payload. They live in the
/// separate notes map and are merged back onto the record after each load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub status: AgentStatus,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,

    /// Private note, never serialized into the agent payload.
    #[serde(skip)]
    pub notes: Option<String>,
    /// Private admin-only note, never serialized into the agent payload.
    #[serde(skip)]
    pub admin_notes: Option<String>,
}

/// Generate a new agent id: millisecond timestamp plus random suffix.
///
/// Practically unique within an installation; not a global identity scheme.
pub fn new_agent_id() -> AgentId {
    let suffix: u16 = rand::random();
    format!("{}-{:04x}", Utc::now().timestamp_millis(), suffix)
}

/// Input for creating a new agent. Only `name` is required; every optional
/// field stays empty when omitted.
#[derive(Debug, Clone, Default)]
pub struct AgentDraft {
    pub name: String,
    pub identifier: Option<String>,
    pub about: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub website_url: Option<String>,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub status: Option<AgentStatus>,
    pub rating: Option<f32>,
    pub is_verified: bool,
}

impl AgentDraft {
    /// Materialize the draft into a full record with a fresh id and timestamps.
    pub fn into_agent(self) -> Agent {
        let now = Utc::now();
        Agent {
            id: new_agent_id(),
            name: self.name,
            identifier: self.identifier,
            about: self.about,
            phone_number: self.phone_number,
            email: self.email,
            website_url: self.website_url,
            platform: self.platform,
            category: self.category,
            specialties: self.specialties,
            languages: self.languages,
            status: self.status.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            is_verified: self.is_verified,
            created_at: now,
            last_activity: Some(now),
            notes: None,
            admin_notes: None,
        }
    }
}
