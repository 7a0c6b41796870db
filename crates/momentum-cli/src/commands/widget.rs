//! Widget-process commands.
//!
//! These operate exclusively on the shared location, never on the primary
//! store; they are what the home-screen widget process runs. Toggles
//! become visible to the primary process through the merge performed by
//! its next projection write.

use clap::Subcommand;
use momentum_core::WidgetBridge;

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Print the current shared data
    Show,
    /// Toggle a todo's completion flag in the shared location
    ToggleTodo {
        /// Todo ID
        id: String,
    },
    /// Toggle a habit's today flag in the shared location
    ToggleHabit {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: WidgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = WidgetBridge::open()?;

    match action {
        WidgetAction::Show => {
            println!("{}", serde_json::to_string_pretty(&bridge.read())?);
        }
        WidgetAction::ToggleTodo { id } => {
            if bridge.toggle_todo(&id) {
                println!("toggled");
            } else {
                println!("Todo not in shared data: {id}");
            }
        }
        WidgetAction::ToggleHabit { id } => {
            if bridge.toggle_habit(&id) {
                println!("toggled");
            } else {
                println!("Habit not in shared data: {id}");
            }
        }
    }
    Ok(())
}
