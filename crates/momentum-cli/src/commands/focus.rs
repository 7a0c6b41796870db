//! Focus session commands for CLI.

use clap::Subcommand;
use momentum_core::{EntityStore, FocusSession};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start a new focus session now
    Start {
        /// Session title
        title: String,
        /// Planned duration in minutes (default: 25)
        #[arg(long, default_value = "25")]
        minutes: u32,
        /// Session notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Finish a running session
    Finish {
        /// Session ID
        id: String,
    },
    /// List sessions
    List,
    /// Delete a session
    Delete {
        /// Session ID
        id: String,
    },
}

pub fn run(action: FocusAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EntityStore::open()?;

    match action {
        FocusAction::Start {
            title,
            minutes,
            notes,
        } => {
            let mut session = FocusSession::start(title, minutes);
            session.notes = notes;
            let id = session.id.clone();
            store.add_focus_session(session);
            println!("Focus session started: {id}");
        }
        FocusAction::Finish { id } => match store.focus_session(&id).cloned() {
            Some(mut session) => {
                session.finish();
                store.update_focus_session(session);
                let finished = store.focus_session(&id).unwrap();
                let elapsed = finished
                    .elapsed()
                    .map(|d| d.num_minutes())
                    .unwrap_or_default();
                println!("Focus session finished after {elapsed} min");
                println!("{}", serde_json::to_string_pretty(finished)?);
            }
            None => println!("Focus session not found: {id}"),
        },
        FocusAction::List => {
            println!("{}", serde_json::to_string_pretty(store.focus_sessions())?);
        }
        FocusAction::Delete { id } => {
            store.delete_focus_session(&id);
            println!("Focus session deleted: {id}");
        }
    }
    Ok(())
}
