//! Auth command service: one method per auth CLI command variant.

use crate::error::ApiError;
use crate::session::state::SessionStore;
use serde::Serialize;

pub struct AuthCommandService;

/// Result of login / admin commands.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub success: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// Result of a password update.
#[derive(Debug, Clone)]
pub struct PasswordUpdateResult {
    pub warning: Option<String>,
}

/// Result of auth status command.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResult {
    pub mode: String,
    pub has_access_to_site: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl AuthCommandService {
    /// Check the site password and grant site access on match.
    pub fn login(session: &mut SessionStore, candidate: &str) -> LoginResult {
        let success = session.check_site_password(candidate);
        LoginResult {
            success,
            error: session.error().map(str::to_string),
            warning: session.take_warning(),
        }
    }

    /// Check the admin password and switch to admin mode on match.
    pub fn admin(session: &mut SessionStore, candidate: &str) -> LoginResult {
        let success = session.switch_to_admin(candidate);
        LoginResult {
            success,
            error: session.error().map(str::to_string),
            warning: session.take_warning(),
        }
    }

    /// Change the site password (admin-gated at the CLI).
    pub fn set_site_password(
        session: &mut SessionStore,
        new_password: &str,
    ) -> Result<PasswordUpdateResult, ApiError> {
        session.update_site_password(new_password)?;
        Ok(PasswordUpdateResult {
            warning: session.take_warning(),
        })
    }

    /// Change the admin password (admin-gated at the CLI).
    pub fn set_admin_password(
        session: &mut SessionStore,
        new_password: &str,
    ) -> Result<PasswordUpdateResult, ApiError> {
        session.update_admin_password(new_password)?;
        Ok(PasswordUpdateResult {
            warning: session.take_warning(),
        })
    }

    /// Current session summary.
    pub fn status(session: &SessionStore) -> AuthStatusResult {
        AuthStatusResult {
            mode: session.mode().as_str().to_string(),
            has_access_to_site: session.has_access_to_site(),
            user_id: session.user().map(|u| u.id.clone()),
        }
    }

    /// Sign out and clear the persisted session.
    pub fn logout(session: &mut SessionStore) {
        session.sign_out();
    }
}
