//! Habit management commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use momentum_core::{EntityStore, Frequency, Habit};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// Habit description
        #[arg(long)]
        description: Option<String>,
        /// Frequency: daily, weekly or monthly (default: daily)
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Comma-separated weekday indices for weekly habits (0=Sunday..6=Saturday)
        #[arg(long)]
        weekdays: Option<String>,
        /// Target day of month for monthly habits (1-31)
        #[arg(long)]
        day_of_month: Option<u32>,
        /// Accent color as hex (e.g. "#3b82f6")
        #[arg(long)]
        color: Option<String>,
        /// Category label
        #[arg(long)]
        category: Option<String>,
    },
    /// List habits
    List {
        /// Only active habits
        #[arg(long)]
        active: bool,
    },
    /// Toggle a habit's completion for a date
    Check {
        /// Habit ID
        id: String,
        /// Calendar day (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Resume an inactive habit
    Activate {
        /// Habit ID
        id: String,
    },
    /// Pause a habit without losing its history
    Deactivate {
        /// Habit ID
        id: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EntityStore::open()?;

    match action {
        HabitAction::Add {
            title,
            description,
            frequency,
            weekdays,
            day_of_month,
            color,
            category,
        } => {
            let mut habit = Habit::new(title);
            habit.description = description;
            habit.frequency = match frequency.as_str() {
                "weekly" => Frequency::Weekly,
                "monthly" => Frequency::Monthly,
                _ => Frequency::Daily,
            };
            if let Some(days) = weekdays {
                habit.weekdays = days
                    .split(',')
                    .filter_map(|d| d.trim().parse::<u8>().ok())
                    .filter(|d| *d < 7)
                    .collect();
            }
            habit.day_of_month = day_of_month;
            if habit.frequency == Frequency::Monthly && habit.day_of_month.is_none() {
                return Err("monthly habits require --day-of-month".into());
            }
            if let Some(hex) = color {
                habit.color = hex.parse()?;
            }
            habit.category = category.unwrap_or_default();
            let id = habit.id.clone();
            store.add_habit(habit);
            println!("Habit created: {id}");
            println!("{}", serde_json::to_string_pretty(store.habit(&id).unwrap())?);
        }
        HabitAction::List { active } => {
            let filtered: Vec<_> = store
                .habits()
                .iter()
                .filter(|habit| !active || habit.active)
                .collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        HabitAction::Check { id, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            if store.check_habit(&id, date) {
                println!("{}", serde_json::to_string_pretty(store.habit(&id).unwrap())?);
            } else {
                match store.habit(&id) {
                    Some(_) => println!("Habit does not apply on {date}"),
                    None => println!("Habit not found: {id}"),
                }
            }
        }
        HabitAction::Activate { id } => set_active(&mut store, &id, true)?,
        HabitAction::Deactivate { id } => set_active(&mut store, &id, false)?,
        HabitAction::Delete { id } => {
            store.delete_habit(&id);
            println!("Habit deleted: {id}");
        }
    }
    Ok(())
}

fn set_active(
    store: &mut EntityStore,
    id: &str,
    active: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match store.habit(id).cloned() {
        Some(mut habit) => {
            habit.active = active;
            store.update_habit(habit);
            println!("{}", serde_json::to_string_pretty(store.habit(id).unwrap())?);
        }
        None => println!("Habit not found: {id}"),
    }
    Ok(())
}
