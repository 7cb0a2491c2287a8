//! Session store: access mode, site gate, and rehydration with expiry.
//!
//! Expiry is enforced when the session is loaded, not by a running timer: a
//! stale login stamp is cleared back to visitor during load. Wrong passwords
//! set an inline error message; there is no lockout and no backoff.

use crate::directory::validation::validate_password;
use crate::error::ApiError;
use crate::session::settings::SettingsRepository;
use crate::store::{keys, load_json, save_json, LocalStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Coarse access mode. Admin implies site access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    Visitor,
    Admin,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Visitor => "visitor",
            AccessMode::Admin => "admin",
        }
    }
}

/// Synthetic local admin identity; there is no real identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub id: String,
}

impl AdminUser {
    fn local() -> Self {
        Self {
            id: "admin-local".to_string(),
        }
    }
}

/// The slice of session state that persists across runs. Whitelist only:
/// mode and the site-access flag, nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    mode: AccessMode,
    #[serde(default)]
    has_access_to_site: bool,
}

pub struct SessionStore {
    mode: AccessMode,
    has_access_to_site: bool,
    user: Option<AdminUser>,
    error: Option<String>,
    warning: Option<String>,
    site_password: String,
    admin_password: String,
    settings: Arc<dyn SettingsRepository>,
    store: Arc<dyn LocalStore>,
    expiry: Duration,
}

impl SessionStore {
    /// Rehydrate the session. An expired or missing login stamp clears any
    /// persisted access back to visitor; settings failures fall back to the
    /// defaults with a soft warning rather than locking the user out.
    pub fn load(
        settings: Arc<dyn SettingsRepository>,
        store: Arc<dyn LocalStore>,
        expiry: Duration,
    ) -> Self {
        let mut warning = None;
        let site_password = settings.site_password().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "site password unavailable, using default");
            warning = Some(format!("Settings unavailable: {}", e));
            crate::session::settings::DEFAULT_SITE_PASSWORD.to_string()
        });
        let admin_password = settings.admin_password().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "admin password unavailable, using default");
            crate::session::settings::DEFAULT_ADMIN_PASSWORD.to_string()
        });

        let persisted: PersistedSession = load_json(store.as_ref(), keys::AUTH_STORAGE)
            .ok()
            .flatten()
            .unwrap_or_default();
        let login_time: Option<i64> = load_json(store.as_ref(), keys::LOGIN_TIME).ok().flatten();

        let mut session = Self {
            mode: persisted.mode,
            has_access_to_site: persisted.has_access_to_site,
            user: match persisted.mode {
                AccessMode::Admin => Some(AdminUser::local()),
                AccessMode::Visitor => None,
            },
            error: None,
            warning,
            site_password,
            admin_password,
            settings,
            store,
            expiry,
        };

        if session.has_access_to_site || session.mode == AccessMode::Admin {
            let expired = match login_time {
                Some(stamp) => {
                    let age_ms = Utc::now().timestamp_millis().saturating_sub(stamp);
                    age_ms < 0 || age_ms as u128 >= session.expiry.as_millis()
                }
                None => true,
            };
            if expired {
                tracing::info!("session expired at rehydration, reverting to visitor");
                session.clear_session();
            }
        }

        session
    }

    fn clear_session(&mut self) {
        self.mode = AccessMode::Visitor;
        self.has_access_to_site = false;
        self.user = None;
        for key in [keys::AUTH_STORAGE, keys::LOGIN_TIME, keys::SESSION_ID] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "session key cleanup failed");
            }
        }
    }

    fn persist_slice(&mut self) {
        let slice = PersistedSession {
            mode: self.mode,
            has_access_to_site: self.has_access_to_site,
        };
        if let Err(e) = save_json(self.store.as_ref(), keys::AUTH_STORAGE, &slice) {
            tracing::warn!(error = %e, "session slice not persisted");
            self.warning = Some(format!("Session saved in memory only: {}", e));
        }
    }

    fn stamp_login(&mut self) {
        let now = Utc::now().timestamp_millis();
        if let Err(e) = save_json(self.store.as_ref(), keys::LOGIN_TIME, &now) {
            tracing::warn!(error = %e, "login stamp not persisted");
        }
        let session_id = format!("{:016x}", rand::random::<u64>());
        if let Err(e) = save_json(self.store.as_ref(), keys::SESSION_ID, &session_id) {
            tracing::warn!(error = %e, "session id not persisted");
        }
    }

    /// Check the site password. On match, grants site access and stamps the
    /// login time; on mismatch, records an inline error and returns false.
    pub fn check_site_password(&mut self, candidate: &str) -> bool {
        if candidate != self.site_password {
            self.error = Some("Incorrect site password".to_string());
            return false;
        }
        self.error = None;
        self.has_access_to_site = true;
        self.stamp_login();
        self.persist_slice();
        tracing::info!("site access granted");
        true
    }

    /// Check the admin password. On match, switches to admin mode (which
    /// implies site access) with a synthetic local user.
    pub fn switch_to_admin(&mut self, candidate: &str) -> bool {
        if candidate != self.admin_password {
            self.error = Some("Incorrect admin password".to_string());
            return false;
        }
        self.error = None;
        self.mode = AccessMode::Admin;
        self.has_access_to_site = true;
        self.user = Some(AdminUser::local());
        self.stamp_login();
        self.persist_slice();
        tracing::info!("admin mode enabled");
        true
    }

    /// Change the site password. Takes effect immediately for the next check
    /// in this session; a settings write failure degrades to memory-only
    /// with a warning, never blocking the change.
    pub fn update_site_password(&mut self, new_password: &str) -> Result<(), ApiError> {
        validate_password(new_password)?;
        self.site_password = new_password.to_string();
        if let Err(e) = self.settings.set_site_password(new_password) {
            tracing::warn!(error = %e, "site password change not persisted");
            self.warning = Some(format!("Password changed in memory only: {}", e));
        }
        tracing::info!("site password updated");
        Ok(())
    }

    /// Change the admin password; same semantics as the site variant.
    pub fn update_admin_password(&mut self, new_password: &str) -> Result<(), ApiError> {
        validate_password(new_password)?;
        self.admin_password = new_password.to_string();
        if let Err(e) = self.settings.set_admin_password(new_password) {
            tracing::warn!(error = %e, "admin password change not persisted");
            self.warning = Some(format!("Password changed in memory only: {}", e));
        }
        tracing::info!("admin password updated");
        Ok(())
    }

    /// Drop back to visitor and clear every persisted session key.
    pub fn sign_out(&mut self) {
        self.clear_session();
        tracing::info!("signed out");
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn has_access_to_site(&self) -> bool {
        self.has_access_to_site
    }

    pub fn user(&self) -> Option<&AdminUser> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    /// Guard for admin-gated operations.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.mode != AccessMode::Admin {
            return Err(ApiError::Unauthorized(
                "admin access required; run 'oxo admin' first".to_string(),
            ));
        }
        Ok(())
    }

    /// Guard for site-gated operations.
    pub fn require_site_access(&self) -> Result<(), ApiError> {
        if !self.has_access_to_site {
            return Err(ApiError::Unauthorized(
                "site access required; run 'oxo login' first".to_string(),
            ));
        }
        Ok(())
    }
}
