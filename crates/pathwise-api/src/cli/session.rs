//! Session management CLI commands: list, rename, delete.
//!
//! Provides session browsing with rich tables, pagination flags, and
//! deletion with a confirmation prompt.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;
use uuid::Uuid;

use crate::state::AppState;

/// List sessions for a user, most recently active first.
///
/// # Examples
///
/// ```bash
/// pathwise sessions list
/// pathwise sessions list --page 2 --page-size 10 --json
/// ```
pub async fn list_sessions(
    state: &AppState,
    user: &str,
    page: u32,
    page_size: u32,
    json: bool,
) -> Result<()> {
    let sessions = state
        .chat_service
        .list_sessions(user, page, page_size)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.items.is_empty() {
        println!();
        println!(
            "  {} No sessions found. Start one with: {}",
            style("i").blue().bold(),
            style("pathwise chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for (i, session) in sessions.items.iter().enumerate() {
        let title_display = if session.title.chars().count() > 40 {
            let truncated: String = session.title.chars().take(37).collect();
            format!("{truncated}...")
        } else {
            session.title.clone()
        };

        table.add_row(vec![
            Cell::new((i + 1).to_string()).fg(Color::DarkGrey),
            Cell::new(title_display).fg(Color::Cyan),
            Cell::new(session.updated_at.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::White),
            Cell::new(session.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  page {} of {} ({} session{})",
        style(sessions.page).bold(),
        style(sessions.total_pages.max(1)).bold(),
        style(sessions.total).bold(),
        if sessions.total == 1 { "" } else { "s" }
    );
    if sessions.has_more() {
        println!(
            "  {}",
            style(format!(
                "next: pathwise sessions list --page {}",
                sessions.page + 1
            ))
            .dim()
        );
    }
    println!();

    Ok(())
}

/// Rename a session by ID.
pub async fn rename_session(state: &AppState, id: &str, title: &str, json: bool) -> Result<()> {
    let session_id: Uuid = id.parse().with_context(|| format!("Invalid session ID: {id}"))?;

    state.chat_service.rename_session(&session_id, title).await?;
    let session = state.chat_service.get_session(&session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Renamed session to '{}'",
        style("✓").green().bold(),
        style(&session.title).cyan()
    );
    println!();

    Ok(())
}

/// Delete a session by ID, prompting unless `--force`.
pub async fn delete_session(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let session_id: Uuid = id.parse().with_context(|| format!("Invalid session ID: {id}"))?;

    let session = state.chat_service.get_session(&session_id).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete session '{}' and all its messages?",
                session.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.chat_service.delete_session(&session_id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "session_id": session_id})
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Deleted session '{}'",
        style("✓").green().bold(),
        style(&session.title).cyan()
    );
    println!();

    Ok(())
}
