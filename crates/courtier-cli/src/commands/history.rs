//! Message history command implementation

use anyhow::Result;
use courtier_core::{ApiClient, Config};

use super::truncate;

pub async fn cmd_history(config: &Config, reference: &str) -> Result<()> {
    let api = ApiClient::from_config(config);
    let messages = api.history_messages(reference).await?;

    if messages.is_empty() {
        println!("No messages on record for {}.", reference);
        return Ok(());
    }

    println!();
    println!("💬 Message history for {}", reference);
    println!("   ─────────────────────────────────────────────────────────────");

    for message in &messages {
        println!(
            "   {} │ {:<8} │ {}",
            message.sent_at.format("%Y-%m-%d %H:%M"),
            message.channel,
            truncate(&message.content, 60)
        );
    }

    Ok(())
}
