//! Backup and restore commands.

use clap::Subcommand;
use momentum_core::EntityStore;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full store to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },
    /// Import a previously exported JSON file, replacing all data
    Import {
        /// Input file path
        path: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = EntityStore::open()?;

    match action {
        DataAction::Export { path } => {
            let json = store.export()?;
            std::fs::write(&path, json)?;
            println!("Exported to {}", path.display());
        }
        DataAction::Import { path } => {
            let json = std::fs::read_to_string(&path)?;
            store.import(&json)?;
            println!(
                "Imported {} todos, {} habits, {} focus sessions",
                store.todos().len(),
                store.habits().len(),
                store.focus_sessions().len()
            );
        }
    }
    Ok(())
}
