//! Todo management commands for CLI.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use momentum_core::{EntityStore, Priority, Todo};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Create a new todo
    Add {
        /// Todo title
        title: String,
        /// Todo description
        #[arg(long)]
        description: Option<String>,
        /// Target date (YYYY-MM-DD, default: today)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Priority: low, medium, high or urgent (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Category label
        #[arg(long)]
        category: Option<String>,
    },
    /// List todos
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Only incomplete todos
        #[arg(long)]
        open: bool,
    },
    /// Toggle a todo's completion
    Done {
        /// Todo ID
        id: String,
    },
    /// Update a todo
    Update {
        /// Todo ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New target date
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a todo
    Delete {
        /// Todo ID
        id: String,
    },
}

pub(crate) fn parse_priority(s: &str) -> Priority {
    match s {
        "low" => Priority::Low,
        "high" => Priority::High,
        "urgent" => Priority::Urgent,
        _ => Priority::Medium,
    }
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EntityStore::open()?;

    match action {
        TodoAction::Add {
            title,
            description,
            due,
            priority,
            category,
        } => {
            let mut todo = Todo::new(title, due.unwrap_or_else(|| Local::now().date_naive()));
            todo.description = description;
            todo.priority = parse_priority(&priority);
            todo.category = category.unwrap_or_default();
            let id = todo.id.clone();
            store.add_todo(todo);
            println!("Todo created: {id}");
            println!("{}", serde_json::to_string_pretty(store.todo(&id).unwrap())?);
        }
        TodoAction::List { category, open } => {
            let filtered: Vec<_> = store
                .todos()
                .iter()
                .filter(|todo| {
                    if let Some(ref cat) = category {
                        if todo.category != *cat {
                            return false;
                        }
                    }
                    !(open && todo.completed)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        TodoAction::Done { id } => {
            if store.toggle_todo(&id) {
                println!("{}", serde_json::to_string_pretty(store.todo(&id).unwrap())?);
            } else {
                println!("Todo not found: {id}");
            }
        }
        TodoAction::Update {
            id,
            title,
            description,
            due,
            priority,
            category,
        } => match store.todo(&id).cloned() {
            Some(mut todo) => {
                if let Some(title) = title {
                    todo.title = title;
                }
                if description.is_some() {
                    todo.description = description;
                }
                if let Some(due) = due {
                    todo.due_date = due;
                }
                if let Some(priority) = priority {
                    todo.priority = parse_priority(&priority);
                }
                if let Some(category) = category {
                    todo.category = category;
                }
                store.update_todo(todo);
                println!("{}", serde_json::to_string_pretty(store.todo(&id).unwrap())?);
            }
            None => println!("Todo not found: {id}"),
        },
        TodoAction::Delete { id } => {
            store.delete_todo(&id);
            println!("Todo deleted: {id}");
        }
    }
    Ok(())
}
