//! Agent directory
//!
//! Domain model and store for the contactable-agent directory: the agent
//! record itself, filter criteria, the private notes side store, and the
//! repository port that owns persistence.

pub mod commands;
pub mod filters;
pub mod model;
pub mod notes;
pub mod registry;
pub mod repository;
pub mod validation;

pub use filters::{apply_filters, AgentFilters, SortKey, SortOrder};
pub use model::{Agent, AgentDraft, AgentStatus, Platform};
pub use notes::{AgentNotes, NotesStore};
pub use registry::AgentDirectory;
pub use repository::{AgentRepository, LocalAgentRepository};
pub use validation::ValidationResult;
