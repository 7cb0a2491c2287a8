//! Persisted key names.
//!
//! These names are the wire format shared with earlier deployments of the
//! directory; renaming one silently orphans existing data.

/// Full public agent list, JSON array.
pub const AGENTS: &str = "oxo-agents";

/// Private notes map, JSON object keyed by agent id. Never part of the
/// agent payload under [`AGENTS`].
pub const AGENT_NOTES: &str = "oxo-agent-notes";

/// Site-wide password, JSON string.
pub const SITE_PASSWORD: &str = "oxo-site-password";

/// Admin password, JSON string.
pub const ADMIN_PASSWORD: &str = "oxo-admin-password";

/// Random identifier for the current session, JSON string.
pub const SESSION_ID: &str = "oxo-session-id";

/// Millisecond timestamp of the last successful login, JSON number.
pub const LOGIN_TIME: &str = "oxo-login-time";

/// Persisted session slice: access mode and site-access flag only.
pub const AUTH_STORAGE: &str = "oxo-auth-storage";

/// Persisted directory slice: filter criteria only.
pub const AGENT_STORAGE: &str = "oxo-agent-storage";
