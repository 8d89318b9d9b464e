//! Courtier Core Library
//!
//! Shared functionality for the Courtier outreach tool:
//! - Alias-driven field extraction over raw CRM rows
//! - Client, alert and message-history normalization
//! - Recommendation selection and prompt assembly
//! - Pluggable pitch generation backends (HTTP gateway, mock)
//! - WhatsApp/email dispatch with duplicate-send suppression
//! - Pure outreach state reducer
//! - Filter/sort query builders for the listing endpoints

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod outreach;
pub mod pitch;
pub mod prompt;
pub mod query;
pub mod recommend;

/// Test utilities including the mock CRM backend
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::ApiClient;
pub use config::Config;
pub use dispatch::{normalize_phone, Dispatcher, RecommendationSnapshot};
pub use error::{Error, Result};
pub use extract::FieldMap;
pub use models::{
    Alert, Channel, Client, ClientKind, MoralClient, Page, PhysicalClient, Recommendation,
    RecommendationStatus, SentMessage,
};
pub use normalize::{normalize_alert, normalize_client};
pub use outreach::apply_sent;
pub use pitch::{HttpPitchBackend, MockPitchBackend, PitchBackend, PitchClient};
pub use prompt::{assemble, ChatMessage};
pub use query::{AlertQuery, AlertSort, ClientQuery, ClientSort, SortDir};
pub use recommend::{pick_active, product_for};
