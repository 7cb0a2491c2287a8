//! Session and access control
//!
//! The whole surface is gated behind two shared secrets: a site password for
//! read access and an admin password for mutations. There are no accounts and
//! no identity provider; a successful admin switch fabricates a synthetic
//! local user. Secrets are compared and stored in plaintext, faithfully to
//! the deployments this replaces.

pub mod commands;
pub mod settings;
pub mod state;

pub use settings::{LocalSettingsRepository, SettingsRepository};
pub use state::{AccessMode, AdminUser, SessionStore};
