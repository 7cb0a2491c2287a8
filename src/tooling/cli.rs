//! CLI Tooling
//!
//! Command-line interface for the directory. The context loads configuration,
//! opens the local store, and holds the two stores; each command variant is
//! parsed here, dispatched to its command service, and the result formatted.

use crate::config::{paths, ConfigLoader, OxoConfig};
use crate::directory::commands::{AgentFieldEdits, DirectoryCommandService};
use crate::directory::model::{AgentDraft, AgentStatus, Platform};
use crate::directory::registry::AgentDirectory;
use crate::directory::repository::LocalAgentRepository;
use crate::directory::{AgentFilters, SortKey, SortOrder};
use crate::error::{ApiError, StorageError};
use crate::session::commands::AuthCommandService;
use crate::session::settings::{
    LocalSettingsRepository, DEFAULT_ADMIN_PASSWORD, DEFAULT_SITE_PASSWORD,
};
use crate::session::SessionStore;
use crate::store::{keys, LocalStore, SledLocalStore};
use crate::sync::{RemoteMirror, SyncConfig};
use crate::tooling::format;
use clap::{Parser, Subcommand};
use parking_lot::RwLock;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Oxo CLI - password-gated agent directory with local-first storage
#[derive(Parser)]
#[command(name = "oxo")]
#[command(about = "Password-gated agent directory with local-first storage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where oxo.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Local store directory (overrides config and OXO_STORAGE)
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show unified session and directory status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Unlock the directory with the site password
    Login {
        /// Site password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Switch to admin mode with the admin password
    Admin {
        /// Admin password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop back to visitor and clear the stored session
    Logout,
    /// Change the site or admin password (admin only)
    Password {
        #[command(subcommand)]
        command: PasswordCommands,
    },
    /// Manage directory agents
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Initialize storage and seed default settings
    Init {
        /// Reset passwords to defaults even if already set
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Change the site password
    Site {
        /// New password (prompted when omitted)
        #[arg(long)]
        new: Option<String>,
    },
    /// Change the admin password
    Admin {
        /// New password (prompted when omitted)
        #[arg(long)]
        new: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List agents matching the given filters
    List {
        /// Free-text search across name, contact, and notes fields
        #[arg(long)]
        search: Option<String>,
        /// Platform filter (whatsapp, wechat, telegram, instagram, tiktok, discord, signal)
        #[arg(long)]
        platform: Option<String>,
        /// Category filter (exact, case-insensitive)
        #[arg(long)]
        category: Option<String>,
        /// Status filter (active, inactive, suspended, pending)
        #[arg(long)]
        status: Option<String>,
        /// Minimum rating (0-5)
        #[arg(long)]
        min_rating: Option<f32>,
        /// Only verified agents
        #[arg(long)]
        verified: bool,
        /// Sort key (name, created, platform, rating)
        #[arg(long, default_value = "name")]
        sort: String,
        /// Sort order (asc, desc)
        #[arg(long, default_value = "asc")]
        order: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one agent in full, private notes included
    Show {
        /// Agent id
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a new agent (admin only)
    Create {
        /// Display name (required)
        #[arg(long)]
        name: String,
        /// Handle on the contact platform
        #[arg(long)]
        identifier: Option<String>,
        /// Public description
        #[arg(long)]
        about: Option<String>,
        /// Contact phone number
        #[arg(long)]
        phone: Option<String>,
        /// Contact email
        #[arg(long)]
        email: Option<String>,
        /// Website URL (http or https)
        #[arg(long)]
        website: Option<String>,
        /// Contact platform
        #[arg(long)]
        platform: Option<String>,
        /// Category
        #[arg(long)]
        category: Option<String>,
        /// Specialty (repeatable)
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Language (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,
        /// Status (defaults to active)
        #[arg(long)]
        status: Option<String>,
        /// Rating (0-5)
        #[arg(long)]
        rating: Option<f32>,
        /// Mark as verified
        #[arg(long)]
        verified: bool,
    },
    /// Edit fields of an existing agent (admin only)
    Edit {
        /// Agent id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long)]
        about: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Replace the specialties list (repeatable)
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Replace the languages list (repeatable)
        #[arg(long = "language")]
        languages: Vec<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        rating: Option<f32>,
        /// Set or clear the verified flag
        #[arg(long)]
        verified: Option<bool>,
    },
    /// Remove an agent (admin only; asks for confirmation)
    Remove {
        /// Agent id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Read or write the private notes of an agent
    Notes {
        /// Agent id
        id: String,
        /// Set the private note (empty string clears it; admin only)
        #[arg(long)]
        set: Option<String>,
        /// Set the admin-only note (empty string clears it; admin only)
        #[arg(long)]
        admin_note: Option<String>,
    },
}

pub struct CliContext {
    config: OxoConfig,
    storage_path: PathBuf,
    store: Arc<SledLocalStore>,
    directory: RwLock<AgentDirectory>,
    session: RwLock<SessionStore>,
}

impl CliContext {
    /// Create a new CLI context: load config, open the local store, and
    /// rehydrate both stores.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        storage_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        let storage_path = paths::resolve_storage_path(storage_override.as_deref(), &config)?;
        std::fs::create_dir_all(&storage_path).map_err(StorageError::Io)?;
        let store = Arc::new(SledLocalStore::open(&storage_path.join("oxo.db"))?);

        let local: Arc<dyn LocalStore> = store.clone();
        let repository = Arc::new(LocalAgentRepository::new(Arc::clone(&local)));
        let sync_config =
            SyncConfig::resolve(config.sync.endpoint.clone(), config.sync.token.clone());
        let mirror = RemoteMirror::from_config(&sync_config);
        if sync_config.is_configured() {
            tracing::info!("remote mirror configured");
        }

        let directory = AgentDirectory::load(repository, Arc::clone(&local), mirror);

        let settings = Arc::new(LocalSettingsRepository::new(Arc::clone(&local)));
        let session = SessionStore::load(
            settings,
            Arc::clone(&local),
            Duration::from_secs(config.session.expiry_secs),
        );

        Ok(Self {
            config,
            storage_path,
            store,
            directory: RwLock::new(directory),
            session: RwLock::new(session),
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &OxoConfig {
        &self.config
    }

    /// Execute a parsed command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Status { format } => self.handle_status(format),
            Commands::Login { password } => self.handle_login(password.clone()),
            Commands::Admin { password } => self.handle_admin(password.clone()),
            Commands::Logout => self.handle_logout(),
            Commands::Password { command } => self.handle_password(command),
            Commands::Agent { command } => self.handle_agent(command),
            Commands::Init { force } => self.handle_init(*force),
        }
    }

    fn handle_status(&self, output_format: &str) -> Result<String, ApiError> {
        let session = self.session.read();
        let auth = AuthCommandService::status(&session);
        let directory = self.directory.read();
        let total = directory.agents().len();
        let filtered = directory.filtered().len();

        if output_format == "json" {
            let value = json!({
                "session": auth,
                "directory": { "total": total, "filtered": filtered },
                "storage_path": self.storage_path.display().to_string(),
            });
            return to_pretty_json(&value);
        }
        Ok(format::format_status_text(&auth, total, filtered))
    }

    fn handle_login(&self, password: Option<String>) -> Result<String, ApiError> {
        let candidate = resolve_password(password, "Site password")?;
        let mut session = self.session.write();
        let result = AuthCommandService::login(&mut session, &candidate);
        if !result.success {
            return Err(ApiError::Unauthorized(
                result.error.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
        let mut out = String::from("Site access granted.");
        if let Some(warning) = result.warning {
            out.push_str(&format!("\nWarning: {}", warning));
        }
        Ok(out)
    }

    fn handle_admin(&self, password: Option<String>) -> Result<String, ApiError> {
        let candidate = resolve_password(password, "Admin password")?;
        let mut session = self.session.write();
        let result = AuthCommandService::admin(&mut session, &candidate);
        if !result.success {
            return Err(ApiError::Unauthorized(
                result.error.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
        let mut out = String::from("Admin mode enabled.");
        if let Some(warning) = result.warning {
            out.push_str(&format!("\nWarning: {}", warning));
        }
        Ok(out)
    }

    fn handle_logout(&self) -> Result<String, ApiError> {
        let mut session = self.session.write();
        AuthCommandService::logout(&mut session);
        Ok("Signed out.".to_string())
    }

    fn handle_password(&self, command: &PasswordCommands) -> Result<String, ApiError> {
        let mut session = self.session.write();
        session.require_admin()?;
        let (label, result) = match command {
            PasswordCommands::Site { new } => {
                let new = resolve_password(new.clone(), "New site password")?;
                (
                    "Site",
                    AuthCommandService::set_site_password(&mut session, &new)?,
                )
            }
            PasswordCommands::Admin { new } => {
                let new = resolve_password(new.clone(), "New admin password")?;
                (
                    "Admin",
                    AuthCommandService::set_admin_password(&mut session, &new)?,
                )
            }
        };
        let mut out = format!("{} password updated.", label);
        if let Some(warning) = result.warning {
            out.push_str(&format!("\nWarning: {}", warning));
        }
        Ok(out)
    }

    fn handle_agent(&self, command: &AgentCommands) -> Result<String, ApiError> {
        match command {
            AgentCommands::List {
                search,
                platform,
                category,
                status,
                min_rating,
                verified,
                sort,
                order,
                format,
            } => {
                self.session.read().require_site_access()?;
                let filters = AgentFilters {
                    search: search.clone(),
                    platform: parse_opt::<Platform>(platform.as_deref())?,
                    category: category.clone(),
                    status: parse_opt::<AgentStatus>(status.as_deref())?,
                    min_rating: *min_rating,
                    verified_only: *verified,
                };
                let sort = parse::<SortKey>(sort)?;
                let order = parse::<SortOrder>(order)?;
                let mut directory = self.directory.write();
                let result = DirectoryCommandService::list(&mut directory, filters, sort, order)?;
                if format == "json" {
                    return to_pretty_json(&result);
                }
                Ok(format::format_agent_list_text(&result))
            }
            AgentCommands::Show { id, format } => {
                self.session.read().require_site_access()?;
                let directory = self.directory.read();
                let result = DirectoryCommandService::show(&directory, id)?;
                if format == "json" {
                    // Private notes are serde(skip) on the record; splice them
                    // into the JSON view explicitly.
                    let mut value = serde_json::to_value(&result.agent)
                        .map_err(StorageError::Serde)?;
                    if let Some(map) = value.as_object_mut() {
                        map.insert("notes".to_string(), json!(result.agent.notes));
                        map.insert("adminNotes".to_string(), json!(result.agent.admin_notes));
                    }
                    return to_pretty_json(&value);
                }
                Ok(format::format_agent_detail_text(&result.agent))
            }
            AgentCommands::Create {
                name,
                identifier,
                about,
                phone,
                email,
                website,
                platform,
                category,
                specialties,
                languages,
                status,
                rating,
                verified,
            } => {
                self.session.read().require_admin()?;
                let draft = AgentDraft {
                    name: name.clone(),
                    identifier: identifier.clone(),
                    about: about.clone(),
                    phone_number: phone.clone(),
                    email: email.clone(),
                    website_url: website.clone(),
                    platform: parse_opt::<Platform>(platform.as_deref())?,
                    category: category.clone(),
                    specialties: specialties.clone(),
                    languages: languages.clone(),
                    status: parse_opt::<AgentStatus>(status.as_deref())?,
                    rating: *rating,
                    is_verified: *verified,
                };
                let mut directory = self.directory.write();
                let result = DirectoryCommandService::create(&mut directory, draft)?;
                let mut out = format!("Created agent: {} ({})", result.agent.name, result.agent.id);
                if let Some(warning) = result.warning {
                    out.push_str(&format!("\nWarning: {}", warning));
                }
                Ok(out)
            }
            AgentCommands::Edit {
                id,
                name,
                identifier,
                about,
                phone,
                email,
                website,
                platform,
                category,
                specialties,
                languages,
                status,
                rating,
                verified,
            } => {
                self.session.read().require_admin()?;
                let edits = AgentFieldEdits {
                    name: name.clone(),
                    identifier: identifier.clone(),
                    about: about.clone(),
                    phone_number: phone.clone(),
                    email: email.clone(),
                    website_url: website.clone(),
                    platform: parse_opt::<Platform>(platform.as_deref())?,
                    category: category.clone(),
                    specialties: (!specialties.is_empty()).then(|| specialties.clone()),
                    languages: (!languages.is_empty()).then(|| languages.clone()),
                    status: parse_opt::<AgentStatus>(status.as_deref())?,
                    rating: *rating,
                    verified: *verified,
                };
                let mut directory = self.directory.write();
                let result = DirectoryCommandService::edit(&mut directory, id, edits)?;
                let mut out = format!("Updated agent: {}", result.agent.id);
                if let Some(warning) = result.warning {
                    out.push_str(&format!("\nWarning: {}", warning));
                }
                Ok(out)
            }
            AgentCommands::Remove { id, force } => {
                self.session.read().require_admin()?;
                if !force {
                    use dialoguer::Confirm;
                    let confirmed = Confirm::new()
                        .with_prompt(format!("Remove agent '{}'?", id))
                        .interact()
                        .map_err(|e| {
                            ApiError::ConfigError(format!("Failed to get user input: {}", e))
                        })?;
                    if !confirmed {
                        return Ok("Removal cancelled".to_string());
                    }
                }
                let mut directory = self.directory.write();
                let result = DirectoryCommandService::remove(&mut directory, id)?;
                let mut out = format!("Removed agent: {}", result.agent_id);
                if let Some(warning) = result.warning {
                    out.push_str(&format!("\nWarning: {}", warning));
                }
                Ok(out)
            }
            AgentCommands::Notes {
                id,
                set,
                admin_note,
            } => {
                if set.is_some() || admin_note.is_some() {
                    self.session.read().require_admin()?;
                    let mut directory = self.directory.write();
                    let result = DirectoryCommandService::set_notes(
                        &mut directory,
                        id,
                        set.clone(),
                        admin_note.clone(),
                    )?;
                    return Ok(format::format_notes_text(&result));
                }
                self.session.read().require_site_access()?;
                let directory = self.directory.read();
                let result = DirectoryCommandService::notes(&directory, id)?;
                Ok(format::format_notes_text(&result))
            }
        }
    }

    fn handle_init(&self, force: bool) -> Result<String, ApiError> {
        let mut out = String::from("Initialized directory storage:\n");
        out.push_str(&format!("  Store: {}\n", self.storage_path.display()));

        let local: &dyn LocalStore = self.store.as_ref();
        let mut seeded = Vec::new();
        for (key, default) in [
            (keys::SITE_PASSWORD, DEFAULT_SITE_PASSWORD),
            (keys::ADMIN_PASSWORD, DEFAULT_ADMIN_PASSWORD),
        ] {
            if force || local.get(key)?.is_none() {
                crate::store::save_json(local, key, &default)?;
                seeded.push(key);
            }
        }
        if seeded.is_empty() {
            out.push_str("  Passwords: already configured\n");
        } else {
            out.push_str(&format!("  Passwords: seeded defaults ({})\n", seeded.join(", ")));
        }
        Ok(out)
    }
}

fn resolve_password(flag: Option<String>, prompt: &str) -> Result<String, ApiError> {
    if let Some(password) = flag {
        return Ok(password);
    }
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| ApiError::ConfigError(format!("Failed to read password: {}", e)))
}

fn parse<T>(value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse::<T>().map_err(ApiError::Validation)
}

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value.map(parse::<T>).transpose()
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::StorageError(StorageError::Serde(e)))
}
