//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};

/// Courtier - Insurance CRM outreach assistant
#[derive(Parser)]
#[command(name = "courtier")]
#[command(about = "Pitch and send product recommendations to CRM clients", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (falls back to COURTIER_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// API bearer token (falls back to COURTIER_API_TOKEN; optional)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List clients with their active recommendation
    Clients {
        /// Client population: physique or morale
        #[arg(short, long, default_value = "physique")]
        kind: String,

        /// Page size
        #[arg(long, default_value = "10")]
        limit: u32,

        /// Page offset
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Sort field: score or ref
        #[arg(long, default_value = "score")]
        sort: String,

        /// Sort direction: desc or asc
        #[arg(long, default_value = "desc")]
        dir: String,

        /// Filter by client segment
        #[arg(long)]
        segment: Option<String>,

        /// Filter by risk profile
        #[arg(long)]
        risk: Option<String>,
    },

    /// List expiry and renewal alerts
    Alerts {
        /// Page size
        #[arg(long, default_value = "10")]
        limit: u32,

        /// Page offset
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Sort field: expiry or ref
        #[arg(long, default_value = "expiry")]
        sort: String,

        /// Sort direction: desc or asc
        #[arg(long, default_value = "desc")]
        dir: String,

        /// Filter by alert type
        #[arg(long)]
        alert_type: Option<String>,

        /// Filter by product
        #[arg(long)]
        product: Option<String>,
    },

    /// Show one client's details and recommendations
    Show {
        /// Client reference
        reference: String,
    },

    /// Generate a pitch for a client without sending it
    Pitch {
        /// Client reference
        reference: String,

        /// Product to pitch (defaults to the active recommendation)
        #[arg(short, long)]
        product: Option<String>,

        /// Extra instructions to refine the pitch
        #[arg(short, long)]
        instructions: Option<String>,
    },

    /// Generate a pitch and send it over a channel
    Send {
        /// Client reference
        reference: String,

        /// Delivery channel: whatsapp or email
        #[arg(short, long, default_value = "whatsapp")]
        channel: String,

        /// Product to pitch (defaults to the active recommendation)
        #[arg(short, long)]
        product: Option<String>,

        /// Extra instructions to refine the pitch
        #[arg(short, long)]
        instructions: Option<String>,

        /// Send this exact text instead of generating one
        #[arg(short, long)]
        message: Option<String>,

        /// Skip the confirmation preview
        #[arg(short, long)]
        yes: bool,
    },

    /// Show a client's message history
    History {
        /// Client reference
        reference: String,
    },

    /// Check backend and pitch gateway reachability
    Status,
}
