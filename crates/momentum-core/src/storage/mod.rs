pub mod database;

pub use database::{CollectionKey, Database, DATA_VERSION};

use std::path::PathBuf;

/// Returns `~/.config/momentum[-dev]/` based on MOMENTUM_ENV.
///
/// Set MOMENTUM_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("momentum-dev")
    } else {
        base_dir.join("momentum")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Directory holding the cross-process shared location.
///
/// Both the primary process and the widget process resolve the same path.
/// MOMENTUM_SHARED_DIR overrides it, which is also how tests point two
/// "processes" at a private directory.
pub fn shared_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(dir) = std::env::var("MOMENTUM_SHARED_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }
    let dir = data_dir()?.join("shared");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
