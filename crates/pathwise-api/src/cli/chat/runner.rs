//! Main chat loop orchestration.
//!
//! Drives the client state machine from the terminal: drafts, session
//! switching, optimistic rendering of the submitted message, a spinner
//! while a send is in flight, and slash commands for lifecycle control.

use console::style;
use pathwise_core::chat::repository::ChatRepository;
use pathwise_core::client::{ChatClient, TranscriptEntry};
use pathwise_types::chat::MessageRole;
use pathwise_types::error::SubmitError;
use uuid::Uuid;

use crate::state::AppState;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

const SESSION_PAGE_SIZE: u32 = 20;

/// Run the interactive chat loop for a user.
pub async fn run_chat_loop(
    state: &AppState,
    user: &str,
    resume_session_id: Option<String>,
) -> anyhow::Result<()> {
    let mut client = ChatClient::new(state.chat_service.clone(), user);
    client.refresh_sessions(1, SESSION_PAGE_SIZE).await?;

    match resume_session_id {
        Some(id) => {
            let session_id: Uuid = id
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid session ID: {id}"))?;
            client.select(session_id).await?;
            render_transcript(&client.merged_transcript());
        }
        None => {
            client.start_draft(None);
        }
    }

    print_banner(&client, state);

    let prompt = format!("  {} ", style("You >").green().bold());
    let mut chat_input = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match handle_command(&mut client, &mut chat_input, cmd).await? {
                        LoopControl::Continue => continue,
                        LoopControl::Exit => break,
                    }
                }

                send_message(&mut client, &text).await;
            }
        }
    }

    Ok(())
}

enum LoopControl {
    Continue,
    Exit,
}

fn print_banner<C: ChatRepository>(
    client: &ChatClient<C>,
    state: &AppState,
) {
    println!();
    println!(
        "  {} {}",
        style("Pathwise").cyan().bold(),
        style("career counselor").dim()
    );
    println!(
        "  {}",
        style(format!(
            "provider: {} | /help for commands",
            state.chat_service.provider_name()
        ))
        .dim()
    );
    if client.current().is_draft() {
        println!(
            "  {}",
            style("New conversation -- your first message names the session.").dim()
        );
    }
    println!();
}

/// Submit one message, showing it immediately and spinning until the
/// counselor replies.
async fn send_message<C: ChatRepository>(
    client: &mut ChatClient<C>,
    text: &str,
) {
    // Echo the optimistic user bubble before the send settles.
    println!("  {} {}", style("You:").green().bold(), text);

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = client.submit(text).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if let Some(reply) = client
                .merged_transcript()
                .iter()
                .rev()
                .find(|e| e.role == MessageRole::Assistant)
            {
                println!("  {} {}", style("Counselor:").cyan().bold(), reply.content);
                println!();
            }
        }
        Err(SubmitError::Busy) => {
            eprintln!(
                "  {} A reply is still in flight; wait for it to finish.",
                style("!").yellow().bold()
            );
        }
        Err(SubmitError::Chat(e)) => {
            eprintln!(
                "  {} Message not delivered: {e}",
                style("✗").red().bold()
            );
            println!();
        }
    }
}

async fn handle_command<C: ChatRepository>(
    client: &mut ChatClient<C>,
    chat_input: &mut ChatInput,
    cmd: ChatCommand,
) -> anyhow::Result<LoopControl> {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Clear => chat_input.clear(),
        ChatCommand::Exit => return Ok(LoopControl::Exit),
        ChatCommand::New => {
            client.start_draft(None);
            println!(
                "  {} New conversation. Your first message names the session.",
                style("✓").green().bold()
            );
        }
        ChatCommand::Sessions => {
            client.refresh_sessions(1, SESSION_PAGE_SIZE).await?;
            print_session_list(client);
        }
        ChatCommand::Select(target) => match resolve_target(client, &target) {
            Some(session_id) => match client.select(session_id).await {
                Ok(()) => {
                    render_transcript(&client.merged_transcript());
                }
                Err(e) => {
                    eprintln!("  {} {e}", style("✗").red().bold());
                }
            },
            None => {
                eprintln!(
                    "  {} No session matches '{target}'. Try /sessions first.",
                    style("✗").red().bold()
                );
            }
        },
        ChatCommand::Rename(title) => match client.current().committed_id() {
            Some(session_id) => match client.rename(session_id, &title).await {
                Ok(()) => {
                    println!(
                        "  {} Renamed to '{}'",
                        style("✓").green().bold(),
                        style(title.trim()).cyan()
                    );
                }
                Err(e) => {
                    eprintln!("  {} {e}", style("✗").red().bold());
                }
            },
            None => {
                eprintln!(
                    "  {} Nothing to rename yet -- drafts are named by the first message.",
                    style("!").yellow().bold()
                );
            }
        },
        ChatCommand::Delete => {
            let target = client.current().committed_id();
            if target.is_none() && !client.current().is_draft() {
                eprintln!(
                    "  {} No conversation selected.",
                    style("!").yellow().bold()
                );
                return Ok(LoopControl::Continue);
            }
            match client.remove(target).await {
                Ok(()) => {
                    println!(
                        "  {} Conversation discarded. /new to start another.",
                        style("✓").green().bold()
                    );
                }
                Err(e) => {
                    eprintln!("  {} {e}", style("✗").red().bold());
                }
            }
        }
        ChatCommand::History => render_transcript(&client.merged_transcript()),
        ChatCommand::Unknown(msg) => {
            eprintln!(
                "  {} {msg} (try {})",
                style("?").yellow().bold(),
                style("/help").cyan()
            );
        }
    }

    Ok(LoopControl::Continue)
}

/// Resolve a `/select` target: a 1-based index into the cached session
/// list, or a full session ID.
fn resolve_target<C: ChatRepository>(
    client: &ChatClient<C>,
    target: &str,
) -> Option<Uuid> {
    if let Ok(index) = target.parse::<usize>() {
        return client
            .sessions()
            .items
            .get(index.checked_sub(1)?)
            .map(|s| s.id);
    }
    target.parse::<Uuid>().ok()
}

fn print_session_list<C: ChatRepository>(
    client: &ChatClient<C>,
) {
    let page = client.sessions();
    if page.items.is_empty() {
        println!("  {}", style("No sessions yet.").dim());
        return;
    }

    println!();
    let current = client.current().committed_id();
    for (i, session) in page.items.iter().enumerate() {
        let marker = if current == Some(session.id) { "*" } else { " " };
        println!(
            "  {marker} {} {}  {}",
            style(format!("{:>2}.", i + 1)).dim(),
            style(&session.title).cyan(),
            style(session.updated_at.format("%Y-%m-%d %H:%M")).dim()
        );
    }
    println!();
    println!(
        "  {}",
        style(format!(
            "page {} of {} -- /select <n> to switch",
            page.page,
            page.total_pages.max(1)
        ))
        .dim()
    );
    println!();
}

fn render_transcript(entries: &[TranscriptEntry]) {
    if entries.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        return;
    }

    println!();
    for entry in entries {
        let label = match entry.role {
            MessageRole::Assistant => style("Counselor:").cyan().bold(),
            _ => style("You:").green().bold(),
        };
        let suffix = if entry.pending {
            format!(" {}", style("(sending)").dim())
        } else {
            String::new()
        };
        println!("  {} {}{}", label, entry.content, suffix);
    }
    println!();
}
