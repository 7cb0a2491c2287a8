//! Settings repository: the two singleton secrets.
//!
//! Seeded with hard-coded defaults on first read, overwritten in place on
//! update, no history kept.

use crate::error::ApiError;
use crate::store::{keys, load_json, save_json, LocalStore};
use std::sync::Arc;

/// Default site password before anyone changes it.
pub const DEFAULT_SITE_PASSWORD: &str = "oxo2024";
/// Default admin password before anyone changes it.
pub const DEFAULT_ADMIN_PASSWORD: &str = "oxo2025admin";

pub trait SettingsRepository: Send + Sync {
    fn site_password(&self) -> Result<String, ApiError>;
    fn admin_password(&self) -> Result<String, ApiError>;
    fn set_site_password(&self, value: &str) -> Result<(), ApiError>;
    fn set_admin_password(&self, value: &str) -> Result<(), ApiError>;
}

/// Settings over the local key-value store. Missing or corrupt values fall
/// back to the defaults; a read never fails into a locked-out state.
pub struct LocalSettingsRepository {
    store: Arc<dyn LocalStore>,
}

impl LocalSettingsRepository {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }
}

impl SettingsRepository for LocalSettingsRepository {
    fn site_password(&self) -> Result<String, ApiError> {
        Ok(load_json(self.store.as_ref(), keys::SITE_PASSWORD)?
            .unwrap_or_else(|| DEFAULT_SITE_PASSWORD.to_string()))
    }

    fn admin_password(&self) -> Result<String, ApiError> {
        Ok(load_json(self.store.as_ref(), keys::ADMIN_PASSWORD)?
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()))
    }

    fn set_site_password(&self, value: &str) -> Result<(), ApiError> {
        save_json(self.store.as_ref(), keys::SITE_PASSWORD, &value)
    }

    fn set_admin_password(&self, value: &str) -> Result<(), ApiError> {
        save_json(self.store.as_ref(), keys::ADMIN_PASSWORD, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SledLocalStore;

    fn settings() -> (tempfile::TempDir, LocalSettingsRepository) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SledLocalStore::open(&dir.path().join("store")).unwrap());
        (dir, LocalSettingsRepository::new(store))
    }

    #[test]
    fn defaults_apply_on_first_run() {
        let (_dir, settings) = settings();
        assert_eq!(settings.site_password().unwrap(), DEFAULT_SITE_PASSWORD);
        assert_eq!(settings.admin_password().unwrap(), DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn updates_overwrite_in_place() {
        let (_dir, settings) = settings();
        settings.set_site_password("newpass1").unwrap();
        assert_eq!(settings.site_password().unwrap(), "newpass1");
        settings.set_site_password("newpass2").unwrap();
        assert_eq!(settings.site_password().unwrap(), "newpass2");
        // Admin password is independent.
        assert_eq!(settings.admin_password().unwrap(), DEFAULT_ADMIN_PASSWORD);
    }
}
