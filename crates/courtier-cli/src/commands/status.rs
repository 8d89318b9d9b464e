//! Backend reachability command implementation

use anyhow::Result;
use courtier_core::{Config, PitchBackend, PitchClient};

pub async fn cmd_status(config: &Config) -> Result<()> {
    let pitch = PitchClient::from_config(config);

    println!();
    println!("🩺 Backend status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   URL:   {}", config.base_url);
    println!(
        "   Auth:  {}",
        if config.token.is_some() {
            "bearer token configured"
        } else {
            "unauthenticated"
        }
    );

    if pitch.health_check().await {
        println!("   State: ✅ reachable");
    } else {
        println!("   State: ❌ unreachable");
    }

    Ok(())
}
