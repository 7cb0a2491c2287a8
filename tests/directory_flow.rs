//! End-to-end directory lifecycle through the CLI context, including
//! persistence across simulated reloads.

mod support;

use oxo::error::ApiError;
use oxo::tooling::cli::{AgentCommands, Commands};
use support::{become_admin, create_agent, TestEnv};

fn show_json(context: &oxo::tooling::cli::CliContext, id: &str) -> serde_json::Value {
    let output = context
        .execute(&Commands::Agent {
            command: AgentCommands::Show {
                id: id.to_string(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn create_with_only_name_round_trips_with_empty_optionals() {
    let env = TestEnv::new();
    let id;
    {
        let context = env.open();
        become_admin(&context);
        id = create_agent(&context, "Test Agent");
    }

    // Reload from disk with a fresh context.
    let context = env.open();
    become_admin(&context);
    let agent = show_json(&context, &id);
    assert_eq!(agent.get("name").and_then(|v| v.as_str()), Some("Test Agent"));
    assert!(agent.get("email").is_none() || agent["email"].is_null());
    assert!(agent.get("platform").is_none() || agent["platform"].is_null());
    assert_eq!(agent.get("status").and_then(|v| v.as_str()), Some("active"));
}

#[test]
fn notes_survive_reload_but_never_enter_the_agent_payload() {
    let env = TestEnv::new();
    let id;
    {
        let context = env.open();
        become_admin(&context);
        id = create_agent(&context, "Ana");
        context
            .execute(&Commands::Agent {
                command: AgentCommands::Notes {
                    id: id.clone(),
                    set: Some("private context".to_string()),
                    admin_note: Some("admin context".to_string()),
                },
            })
            .unwrap();
    }

    let context = env.open();
    become_admin(&context);
    let agent = show_json(&context, &id);
    assert_eq!(
        agent.get("notes").and_then(|v| v.as_str()),
        Some("private context")
    );
    assert_eq!(
        agent.get("adminNotes").and_then(|v| v.as_str()),
        Some("admin context")
    );
}

#[test]
fn delete_then_reload_never_returns_the_agent() {
    let env = TestEnv::new();
    let id;
    {
        let context = env.open();
        become_admin(&context);
        id = create_agent(&context, "Doomed");
        create_agent(&context, "Survivor");
        context
            .execute(&Commands::Agent {
                command: AgentCommands::Remove {
                    id: id.clone(),
                    force: true,
                },
            })
            .unwrap();
    }

    let context = env.open();
    become_admin(&context);
    let result = context.execute(&Commands::Agent {
        command: AgentCommands::Show {
            id: id.clone(),
            format: "json".to_string(),
        },
    });
    assert!(matches!(result, Err(ApiError::AgentNotFound(_))));

    let output = context
        .execute(&Commands::Agent {
            command: support::list_command(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(1));
}

#[test]
fn removing_twice_reports_not_found() {
    let env = TestEnv::new();
    let context = env.open();
    become_admin(&context);
    let id = create_agent(&context, "Once");
    context
        .execute(&Commands::Agent {
            command: AgentCommands::Remove {
                id: id.clone(),
                force: true,
            },
        })
        .unwrap();
    let result = context.execute(&Commands::Agent {
        command: AgentCommands::Remove { id, force: true },
    });
    assert!(matches!(result, Err(ApiError::AgentNotFound(_))));
}

#[test]
fn list_filters_compose_conjunctively() {
    let env = TestEnv::new();
    let context = env.open();
    become_admin(&context);

    context
        .execute(&Commands::Agent {
            command: AgentCommands::Create {
                name: "Ana".to_string(),
                identifier: None,
                about: None,
                phone: None,
                email: None,
                website: None,
                platform: Some("telegram".to_string()),
                category: Some("travel".to_string()),
                specialties: vec![],
                languages: vec![],
                status: None,
                rating: Some(4.5),
                verified: true,
            },
        })
        .unwrap();
    context
        .execute(&Commands::Agent {
            command: AgentCommands::Create {
                name: "Bo".to_string(),
                identifier: None,
                about: None,
                phone: None,
                email: None,
                website: None,
                platform: Some("telegram".to_string()),
                category: None,
                specialties: vec![],
                languages: vec![],
                status: None,
                rating: Some(2.0),
                verified: false,
            },
        })
        .unwrap();

    let output = context
        .execute(&Commands::Agent {
            command: AgentCommands::List {
                search: None,
                platform: Some("telegram".to_string()),
                category: None,
                status: None,
                min_rating: Some(4.0),
                verified: true,
                sort: "name".to_string(),
                order: "asc".to_string(),
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("total").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(parsed.get("shown").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        parsed["agents"][0].get("name").and_then(|v| v.as_str()),
        Some("Ana")
    );
}

#[test]
fn edit_updates_fields_and_persists() {
    let env = TestEnv::new();
    let id;
    {
        let context = env.open();
        become_admin(&context);
        id = create_agent(&context, "Draft Name");
        context
            .execute(&Commands::Agent {
                command: AgentCommands::Edit {
                    id: id.clone(),
                    name: Some("Final Name".to_string()),
                    identifier: None,
                    about: None,
                    phone: None,
                    email: Some("final@example.com".to_string()),
                    website: None,
                    platform: None,
                    category: None,
                    specialties: vec![],
                    languages: vec![],
                    status: Some("suspended".to_string()),
                    rating: None,
                    verified: None,
                },
            })
            .unwrap();
    }

    let context = env.open();
    become_admin(&context);
    let agent = show_json(&context, &id);
    assert_eq!(agent.get("name").and_then(|v| v.as_str()), Some("Final Name"));
    assert_eq!(
        agent.get("email").and_then(|v| v.as_str()),
        Some("final@example.com")
    );
    assert_eq!(
        agent.get("status").and_then(|v| v.as_str()),
        Some("suspended")
    );
}

#[test]
fn create_rejects_malformed_contact_fields() {
    let env = TestEnv::new();
    let context = env.open();
    become_admin(&context);
    let result = context.execute(&Commands::Agent {
        command: AgentCommands::Create {
            name: "Bad Contact".to_string(),
            identifier: None,
            about: None,
            phone: None,
            email: Some("not-an-email".to_string()),
            website: None,
            platform: None,
            category: None,
            specialties: vec![],
            languages: vec![],
            status: None,
            rating: None,
            verified: false,
        },
    });
    assert!(matches!(result, Err(ApiError::Validation(_))));
}
