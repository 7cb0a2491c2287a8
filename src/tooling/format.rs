//! Text formatting for CLI output: tables for lists, labeled sections for
//! detail views. JSON rendering stays in the command handlers.

use crate::directory::commands::{AgentListResult, NotesResult};
use crate::directory::model::Agent;
use crate::session::commands::AuthStatusResult;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Agent list as a table plus a count footer.
pub fn format_agent_list_text(result: &AgentListResult) -> String {
    let mut out = String::new();
    if result.agents.is_empty() {
        out.push_str("No agents match.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec![
            "ID", "Name", "Platform", "Category", "Status", "Rating", "Verified",
        ]);
        for agent in &result.agents {
            table.add_row(vec![
                agent.id.clone(),
                agent.name.clone(),
                agent.platform.clone().unwrap_or_else(|| "-".to_string()),
                agent.category.clone().unwrap_or_else(|| "-".to_string()),
                agent.status.clone(),
                format!("{:.1}", agent.rating),
                if agent.verified { "yes" } else { "no" }.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out.push_str(&format!(
        "Showing {} of {} agents\n",
        result.shown, result.total
    ));
    if let Some(warning) = &result.warning {
        out.push_str(&format!("Warning: {}\n", warning));
    }
    out
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("  {}: {}\n", label, value));
    }
}

/// Full agent detail, private notes included.
pub fn format_agent_detail_text(agent: &Agent) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading(&agent.name)));
    out.push_str(&format!("  ID: {}\n", agent.id));
    push_field(&mut out, "Identifier", agent.identifier.as_deref());
    push_field(&mut out, "About", agent.about.as_deref());
    push_field(&mut out, "Phone", agent.phone_number.as_deref());
    push_field(&mut out, "Email", agent.email.as_deref());
    push_field(&mut out, "Website", agent.website_url.as_deref());
    if let Some(platform) = agent.platform {
        out.push_str(&format!("  Platform: {}\n", platform));
    }
    push_field(&mut out, "Category", agent.category.as_deref());
    if !agent.specialties.is_empty() {
        out.push_str(&format!("  Specialties: {}\n", agent.specialties.join(", ")));
    }
    if !agent.languages.is_empty() {
        out.push_str(&format!("  Languages: {}\n", agent.languages.join(", ")));
    }
    out.push_str(&format!("  Status: {}\n", agent.status));
    out.push_str(&format!("  Rating: {:.1}\n", agent.rating));
    out.push_str(&format!(
        "  Verified: {}\n",
        if agent.is_verified { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "  Created: {}\n",
        agent.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(last) = agent.last_activity {
        out.push_str(&format!(
            "  Last activity: {}\n",
            last.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    push_field(&mut out, "Notes", agent.notes.as_deref());
    push_field(&mut out, "Admin notes", agent.admin_notes.as_deref());
    out
}

/// Private notes view.
pub fn format_notes_text(result: &NotesResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Notes for {}\n", result.agent_id));
    match result.notes.notes.as_deref() {
        Some(notes) => out.push_str(&format!("  Notes: {}\n", notes)),
        None => out.push_str("  Notes: (none)\n"),
    }
    match result.notes.admin_notes.as_deref() {
        Some(notes) => out.push_str(&format!("  Admin notes: {}\n", notes)),
        None => out.push_str("  Admin notes: (none)\n"),
    }
    out
}

/// Unified status: session section plus directory counts.
pub fn format_status_text(auth: &AuthStatusResult, total: usize, filtered: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_section_heading("Session")));
    out.push_str(&format!("  Mode: {}\n", auth.mode));
    out.push_str(&format!(
        "  Site access: {}\n",
        if auth.has_access_to_site { "yes" } else { "no" }
    ));
    if let Some(user) = &auth.user_id {
        out.push_str(&format!("  User: {}\n", user));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", format_section_heading("Directory")));
    out.push_str(&format!("  Agents: {}\n", total));
    out.push_str(&format!("  Matching current filters: {}\n", filtered));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::commands::AgentListItem;
    use crate::directory::model::AgentDraft;

    #[test]
    fn empty_list_renders_placeholder() {
        let result = AgentListResult {
            total: 0,
            shown: 0,
            agents: vec![],
            warning: None,
        };
        let text = format_agent_list_text(&result);
        assert!(text.contains("No agents match."));
        assert!(text.contains("Showing 0 of 0"));
    }

    #[test]
    fn list_table_contains_rows() {
        let result = AgentListResult {
            total: 1,
            shown: 1,
            agents: vec![AgentListItem {
                id: "1".to_string(),
                name: "Ana".to_string(),
                platform: Some("telegram".to_string()),
                category: None,
                status: "active".to_string(),
                rating: 4.5,
                verified: true,
            }],
            warning: None,
        };
        let text = format_agent_list_text(&result);
        assert!(text.contains("Ana"));
        assert!(text.contains("telegram"));
        assert!(text.contains("4.5"));
    }

    #[test]
    fn detail_omits_unset_fields() {
        let agent = AgentDraft {
            name: "Solo".to_string(),
            ..Default::default()
        }
        .into_agent();
        let text = format_agent_detail_text(&agent);
        assert!(text.contains("Solo"));
        assert!(!text.contains("Email:"));
        assert!(!text.contains("Notes:"));
    }
}
