//! Dotenv loading
//!
//! Values already present in the process environment always win.

use std::path::{Path, PathBuf};

/// Explicit dotenv path override.
pub const ENV_FILE_VAR: &str = "CHATLOG_ENV_FILE";

/// Location older deployments keep their settings in.
pub const DEFAULT_ENV_FILE: &str = "env_config/.env.local";

/// Load `CHATLOG_ENV_FILE`, else `env_config/.env.local`, then `.env`.
///
/// Missing files are skipped; parse errors are reported on stderr because
/// tracing is not installed yet.
pub fn load_dotenv() {
    let primary = std::env::var_os(ENV_FILE_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));

    load_file(&primary);

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to load .env: {}", e);
        }
    }
}

fn load_file(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = dotenvy::from_path(path) {
        eprintln!("warning: failed to load {}: {}", path.display(), e);
    }
}
