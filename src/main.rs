//! Lumina Academy assistant
//!
//! Terminal front end for the school's chat surfaces: a general-purpose
//! assistant and an admissions guide, both answered by a hosted Gemini model.

mod conversation;
mod fetcher;
mod llm;
mod persona;
mod runtime;

use conversation::{Role, TranscriptView, Turn};
use llm::LlmConfig;
use persona::Surface;
use runtime::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Say(&'a str),
    Ask(usize),
    ListSuggestions,
    History,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line);
        };
        let mut words = rest.split_whitespace();
        match (words.next(), words.next()) {
            (Some("quit" | "exit"), None) => Command::Quit,
            (Some("faq"), None) => Command::ListSuggestions,
            (Some("history"), None) => Command::History,
            // Suggestions are numbered from 1 at the prompt
            (Some("ask"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Ask(n - 1),
                _ => Command::Unknown(trimmed),
            },
            _ => Command::Unknown(trimmed),
        }
    }
}

fn format_turn(turn: &Turn) -> String {
    match turn.role() {
        Role::User => format!("you> {}", turn.text()),
        Role::Model => format!("assistant> {}", turn.text()),
    }
}

/// Print turns as they land and a typing indicator while a reply is pending
async fn render_transcript(mut rx: watch::Receiver<TranscriptView>) {
    let mut shown = 0;
    loop {
        let view = rx.borrow_and_update().clone();
        for turn in view.turns.iter().skip(shown) {
            println!("{}", format_turn(turn));
        }
        shown = view.turns.len();
        if view.awaiting {
            println!("  (assistant is typing...)");
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

fn print_suggestions(surface: Surface) {
    let suggestions = surface.suggestions();
    if suggestions.is_empty() {
        println!("No quick suggestions on the {} surface.", surface.as_str());
        return;
    }
    for (i, question) in suggestions.iter().enumerate() {
        println!("  /ask {}  {question}", i + 1);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumina_assistant=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let surface: Surface = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LUMINA_SURFACE").ok())
        .map(|s| s.parse::<Surface>())
        .transpose()?
        .unwrap_or_default();

    let llm_config = LlmConfig::from_env();
    tracing::info!(
        model = %llm_config.model,
        gateway = ?llm_config.gateway,
        surface = surface.as_str(),
        "Configuration loaded"
    );

    let mut session = ChatSession::new(surface, llm_config.build_service());

    println!("== {} ({}) ==", surface.title(), persona::SCHOOL_NAME);
    if !surface.suggestions().is_empty() {
        println!("Quick questions:");
        print_suggestions(surface);
    }
    println!("Type a message, /faq, /ask N, /history or /quit.");

    let renderer = tokio::spawn(render_transcript(session.subscribe()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match Command::parse(&line) {
            Command::Quit => break,
            Command::ListSuggestions => {
                print_suggestions(session.surface());
                continue;
            }
            Command::History => {
                for turn in session.turns() {
                    println!("{}", format_turn(turn));
                }
                continue;
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {cmd}");
                continue;
            }
            Command::Ask(index) => match session.submit_suggestion(index).await {
                Some(result) => result.map(|_| ()),
                None => {
                    println!("No suggestion #{}.", index + 1);
                    continue;
                }
            },
            Command::Say(text) => session.submit(text).await.map(|_| ()),
        };

        if let Err(e) = outcome {
            tracing::debug!(error = %e, "Submission ignored");
        }
        // Let the renderer catch up before the next prompt
        tokio::task::yield_now().await;
    }

    drop(session);
    renderer.await?;
    Ok(())
}
