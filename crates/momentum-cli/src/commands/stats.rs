//! Statistics and streak commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use momentum_core::{stats, EntityStore};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show the aggregate statistics record
    Show,
    /// Show streaks (whole-store, or per habit with --habit)
    Streak {
        /// Habit ID for a per-habit streak
        #[arg(long)]
        habit: Option<String>,
    },
    /// Habit completion ratio for the current week or month
    Progress {
        /// Period: week or month (default: week)
        #[arg(long, default_value = "week")]
        period: String,
        /// Anchor date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = EntityStore::open()?;
    let today = Local::now().date_naive();

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(store.statistics())?);
            println!(
                "todo completion rate:  {:.0}%",
                stats::completion_rate(store.todos()) * 100.0
            );
            println!(
                "habit completion rate: {:.0}%",
                stats::habit_completion_rate(store.habits()) * 100.0
            );
        }
        StatsAction::Streak { habit } => match habit {
            Some(id) => match store.habit(&id) {
                Some(habit) => {
                    println!("{}", stats::habit_streak(habit, today));
                }
                None => println!("Habit not found: {id}"),
            },
            None => println!("{}", store.statistics().streak_days),
        },
        StatsAction::Progress { period, date } => {
            let anchor = date.unwrap_or(today);
            let dates = match period.as_str() {
                "month" => stats::month_dates(anchor),
                _ => stats::week_dates(anchor),
            };
            let ratio = stats::period_progress(store.habits(), &dates);
            println!("{:.2}", ratio);
        }
    }
    Ok(())
}
