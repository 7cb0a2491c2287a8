//! Oxo: Password-Gated Agent Directory
//!
//! A local-first directory of contactable agents behind two shared secrets:
//! a site password for read access and an admin password for mutations.
//! Persistence goes through a flat key-value store whose key names are kept
//! compatible with earlier deployments; private notes never leave the local
//! store.

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;
pub mod sync;
pub mod tooling;
pub mod types;
