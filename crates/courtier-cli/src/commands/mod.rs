//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `clients` - Client and alert listing commands
//! - `history` - Message history command
//! - `outreach` - Pitch generation and send commands
//! - `status` - Backend/gateway reachability command

pub mod clients;
pub mod history;
pub mod outreach;
pub mod status;

// Re-export command functions for main.rs
pub use clients::*;
pub use history::*;
pub use outreach::*;
pub use status::*;

use anyhow::{Context, Result};
use courtier_core::Config;

/// Resolve connection settings: explicit flags win over the environment
pub fn resolve_config(backend_url: Option<&str>, token: Option<&str>) -> Result<Config> {
    let mut config = match backend_url {
        Some(url) => Config::new(url, None),
        None => Config::from_env()
            .context("backend URL not configured; pass --backend-url or set COURTIER_BACKEND_URL")?,
    };
    if let Some(token) = token {
        config.token = Some(token.to_string());
    }
    Ok(config)
}

/// Truncate a string for column display
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
