//! Session lifecycle through the CLI context: default secrets, password
//! rotation, persistence, and expiry at rehydration.

mod support;

use oxo::error::ApiError;
use oxo::tooling::cli::{Commands, PasswordCommands};
use support::{become_admin, TestEnv, ADMIN_PASSWORD, SITE_PASSWORD};

fn status_json(context: &oxo::tooling::cli::CliContext) -> serde_json::Value {
    let output = context
        .execute(&Commands::Status {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn wrong_site_password_is_rejected_with_message() {
    let env = TestEnv::new();
    let context = env.open();
    let result = context.execute(&Commands::Login {
        password: Some("wrong".to_string()),
    });
    match result {
        Err(ApiError::Unauthorized(msg)) => assert!(msg.contains("Incorrect site password")),
        other => panic!("expected unauthorized, got {:?}", other.map(|_| ())),
    }
    let status = status_json(&context);
    assert_eq!(
        status["session"]["has_access_to_site"].as_bool(),
        Some(false)
    );
}

#[test]
fn default_site_password_grants_access() {
    let env = TestEnv::new();
    let context = env.open();
    context
        .execute(&Commands::Login {
            password: Some(SITE_PASSWORD.to_string()),
        })
        .unwrap();
    let status = status_json(&context);
    assert_eq!(status["session"]["mode"].as_str(), Some("visitor"));
    assert_eq!(status["session"]["has_access_to_site"].as_bool(), Some(true));
}

#[test]
fn default_admin_password_switches_mode() {
    let env = TestEnv::new();
    let context = env.open();
    context
        .execute(&Commands::Admin {
            password: Some(ADMIN_PASSWORD.to_string()),
        })
        .unwrap();
    let status = status_json(&context);
    assert_eq!(status["session"]["mode"].as_str(), Some("admin"));
    assert_eq!(status["session"]["user_id"].as_str(), Some("admin-local"));
}

#[test]
fn session_persists_across_reload_within_expiry() {
    let env = TestEnv::new();
    {
        let context = env.open();
        become_admin(&context);
    }
    let context = env.open();
    let status = status_json(&context);
    assert_eq!(status["session"]["mode"].as_str(), Some("admin"));
}

#[test]
fn session_expires_at_rehydration_with_zero_window() {
    let env = TestEnv::new();
    let config = "[session]\nexpiry_secs = 0\n";
    {
        let context = env.open_with_config(config);
        become_admin(&context);
    }
    let context = env.open_with_config(config);
    let status = status_json(&context);
    assert_eq!(status["session"]["mode"].as_str(), Some("visitor"));
    assert_eq!(
        status["session"]["has_access_to_site"].as_bool(),
        Some(false)
    );
}

#[test]
fn password_change_is_immediate_and_survives_reload() {
    let env = TestEnv::new();
    {
        let context = env.open();
        become_admin(&context);
        context
            .execute(&Commands::Password {
                command: PasswordCommands::Site {
                    new: Some("rotated-secret".to_string()),
                },
            })
            .unwrap();

        // Old password already rejected in the same session.
        context.execute(&Commands::Logout).unwrap();
        assert!(context
            .execute(&Commands::Login {
                password: Some(SITE_PASSWORD.to_string()),
            })
            .is_err());
        context
            .execute(&Commands::Login {
                password: Some("rotated-secret".to_string()),
            })
            .unwrap();
    }

    let context = env.open();
    context
        .execute(&Commands::Login {
            password: Some("rotated-secret".to_string()),
        })
        .unwrap();
}

#[test]
fn short_replacement_password_is_rejected() {
    let env = TestEnv::new();
    let context = env.open();
    become_admin(&context);
    let result = context.execute(&Commands::Password {
        command: PasswordCommands::Admin {
            new: Some("tiny".to_string()),
        },
    });
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[test]
fn logout_clears_access() {
    let env = TestEnv::new();
    {
        let context = env.open();
        become_admin(&context);
        context.execute(&Commands::Logout).unwrap();
        let status = status_json(&context);
        assert_eq!(status["session"]["mode"].as_str(), Some("visitor"));
    }
    // And the cleared state is what a reload sees.
    let context = env.open();
    let status = status_json(&context);
    assert_eq!(status["session"]["mode"].as_str(), Some("visitor"));
}
