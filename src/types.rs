//! Core type aliases for the oxo directory.

/// AgentId: opaque string identifier for a directory entry.
///
/// Generated from a millisecond timestamp plus a random suffix; practically
/// unique within an installation, not globally unique.
pub type AgentId = String;
