//! Courtier CLI - Insurance CRM outreach assistant
//!
//! Usage:
//!   courtier clients --kind physique      List clients by score
//!   courtier alerts --sort expiry         List expiring contracts
//!   courtier pitch C001                   Draft a pitch for a client
//!   courtier send C001 --channel email    Draft and deliver a pitch

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::resolve_config(cli.backend_url.as_deref(), cli.token.as_deref())?;

    match cli.command {
        Commands::Clients {
            kind,
            limit,
            offset,
            sort,
            dir,
            segment,
            risk,
        } => {
            commands::cmd_clients(
                &config,
                &kind,
                limit,
                offset,
                &sort,
                &dir,
                segment.as_deref(),
                risk.as_deref(),
            )
            .await
        }
        Commands::Alerts {
            limit,
            offset,
            sort,
            dir,
            alert_type,
            product,
        } => {
            commands::cmd_alerts(
                &config,
                limit,
                offset,
                &sort,
                &dir,
                alert_type.as_deref(),
                product.as_deref(),
            )
            .await
        }
        Commands::Show { reference } => commands::cmd_show(&config, &reference).await,
        Commands::Pitch {
            reference,
            product,
            instructions,
        } => {
            commands::cmd_pitch(
                &config,
                &reference,
                product.as_deref(),
                instructions.as_deref(),
            )
            .await
        }
        Commands::Send {
            reference,
            channel,
            product,
            instructions,
            message,
            yes,
        } => {
            commands::cmd_send(
                &config,
                &reference,
                &channel,
                product.as_deref(),
                instructions.as_deref(),
                message.as_deref(),
                yes,
            )
            .await
        }
        Commands::History { reference } => commands::cmd_history(&config, &reference).await,
        Commands::Status => commands::cmd_status(&config).await,
    }
}
