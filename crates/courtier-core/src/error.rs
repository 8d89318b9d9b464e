//! Error types for Courtier

use thiserror::Error;

use crate::models::Channel;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pitch generation failed: HTTP {status}: {body}")]
    Generation { status: u16, body: String },

    #[error("Dispatch over {channel} failed: HTTP {status}: {body}")]
    Dispatch {
        channel: Channel,
        status: u16,
        body: String,
    },

    #[error("Backend request failed: HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("No {channel} recipient on record for client {reference}")]
    MissingRecipient {
        channel: Channel,
        reference: String,
    },

    #[error("A send for client {0} is already in flight")]
    InFlight(String),

    #[error("Missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
