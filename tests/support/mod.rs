//! Shared helpers for CLI integration tests.

use oxo::tooling::cli::{AgentCommands, CliContext, Commands};
use std::path::PathBuf;
use tempfile::TempDir;

pub const SITE_PASSWORD: &str = "oxo2024";
pub const ADMIN_PASSWORD: &str = "oxo2025admin";

/// A CLI context over its own temp storage directory. Dropping releases the
/// store lock so the same directory can be reopened to simulate a reload.
pub struct TestEnv {
    pub dir: TempDir,
    pub workspace: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("workspace");
        std::fs::create_dir_all(&workspace).unwrap();
        Self { dir, workspace }
    }

    pub fn storage(&self) -> PathBuf {
        self.dir.path().join("storage")
    }

    pub fn open(&self) -> CliContext {
        CliContext::new(self.workspace.clone(), None, Some(self.storage())).unwrap()
    }

    pub fn open_with_config(&self, config_toml: &str) -> CliContext {
        let config_path = self.dir.path().join("config.toml");
        std::fs::write(&config_path, config_toml).unwrap();
        CliContext::new(self.workspace.clone(), Some(config_path), Some(self.storage())).unwrap()
    }
}

/// Switch the context into admin mode using the default admin password.
pub fn become_admin(context: &CliContext) {
    context
        .execute(&Commands::Admin {
            password: Some(ADMIN_PASSWORD.to_string()),
        })
        .unwrap();
}

/// Create an agent with only a name and return its id.
pub fn create_agent(context: &CliContext, name: &str) -> String {
    let output = context
        .execute(&Commands::Agent {
            command: AgentCommands::Create {
                name: name.to_string(),
                identifier: None,
                about: None,
                phone: None,
                email: None,
                website: None,
                platform: None,
                category: None,
                specialties: vec![],
                languages: vec![],
                status: None,
                rating: None,
                verified: false,
            },
        })
        .unwrap();
    // Output shape: "Created agent: <name> (<id>)"
    let open = output.rfind('(').expect("id in create output");
    let close = output.rfind(')').expect("id in create output");
    output[open + 1..close].to_string()
}

/// Default-valued list command for tests that only tweak a field or two.
pub fn list_command() -> AgentCommands {
    AgentCommands::List {
        search: None,
        platform: None,
        category: None,
        status: None,
        min_rating: None,
        verified: false,
        sort: "name".to_string(),
        order: "asc".to_string(),
        format: "json".to_string(),
    }
}
