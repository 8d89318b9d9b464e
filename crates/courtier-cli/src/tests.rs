//! CLI command tests
//!
//! This module contains all tests for the CLI commands, run against the
//! mock CRM backend from courtier-core.

use courtier_core::test_utils::MockCrmServer;
use courtier_core::Config;
use serde_json::json;

use crate::commands::{self, truncate};

fn seed_clients(server: &MockCrmServer) {
    server.seed_physical(json!({
        "REF_PERSONNE": "C001",
        "NOM_PRENOM": "Yassine Trabelsi",
        "telephone": "+216 22 222 222",
        "courriel": "yassine@example.tn",
        "score": 87.5,
        "recommendations": ["Assurance Auto"]
    }));
    server.seed_moral(json!({
        "REF_PERSONNE": "M001",
        "RAISON_SOCIALE": "Acme SARL",
        "client_score": 55.0
    }));
}

// ========== Listing Command Tests ==========

#[tokio::test]
async fn test_cmd_clients_physical() {
    let server = MockCrmServer::start().await;
    seed_clients(&server);
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_clients(
        &config, "physique", 10, 0, "score", "desc", None, None,
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_clients_rejects_unknown_sort() {
    let server = MockCrmServer::start().await;
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_clients(
        &config, "physique", 10, 0, "alphabetical", "desc", None, None,
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_alerts_empty() {
    let server = MockCrmServer::start().await;
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_alerts(&config, 10, 0, "expiry", "desc", None, None).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_show_joins_detail() {
    let server = MockCrmServer::start().await;
    seed_clients(&server);
    let config = Config::new(&server.url(), None);

    assert!(commands::cmd_show(&config, "C001").await.is_ok());
    assert!(commands::cmd_show(&config, "M001").await.is_ok());
    assert!(commands::cmd_show(&config, "missing").await.is_err());
}

// ========== Outreach Command Tests ==========

#[tokio::test]
async fn test_cmd_pitch_generates_without_sending() {
    let server = MockCrmServer::start().await;
    seed_clients(&server);
    server.set_reply("A short friendly pitch.");
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_pitch(&config, "C001", None, None).await;
    assert!(result.is_ok());
    assert_eq!(server.generate_payloads().len(), 1);
    assert!(server.whatsapp_payloads().is_empty());
    assert!(server.email_payloads().is_empty());
}

#[tokio::test]
async fn test_cmd_send_with_explicit_message_skips_generation() {
    let server = MockCrmServer::start().await;
    seed_clients(&server);
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_send(
        &config,
        "C001",
        "whatsapp",
        None,
        None,
        Some("Hand-written pitch."),
        true,
    )
    .await;
    assert!(result.is_ok());
    assert!(server.generate_payloads().is_empty());

    let payloads = server.whatsapp_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["message"], "Hand-written pitch.");
    assert_eq!(payloads[0]["phone_number"], "22222222");
}

#[tokio::test]
async fn test_cmd_send_rejects_unknown_channel() {
    let server = MockCrmServer::start().await;
    seed_clients(&server);
    let config = Config::new(&server.url(), None);

    let result =
        commands::cmd_send(&config, "C001", "carrier-pigeon", None, None, None, true).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cmd_history_lists_messages() {
    let server = MockCrmServer::start().await;
    server.seed_history(
        "C001",
        vec![json!({
            "id": "m-1",
            "clientRef": "C001",
            "channel": "email",
            "content": "Earlier pitch.",
            "sentAt": "2026-08-01T10:00:00Z"
        })],
    );
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_history(&config, "C001").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_status_reports_reachable() {
    let server = MockCrmServer::start().await;
    let config = Config::new(&server.url(), None);

    let result = commands::cmd_status(&config).await;
    assert!(result.is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("short", 10), "short");
}

#[test]
fn test_truncate_long_string_ellipsized() {
    let out = truncate("a very long description indeed", 10);
    assert!(out.chars().count() <= 10);
    assert!(out.ends_with('…'));
}

#[test]
fn test_resolve_config_prefers_explicit_flags() {
    let config = commands::resolve_config(Some("http://crm.local/"), Some("jwt")).unwrap();
    assert_eq!(config.base_url, "http://crm.local");
    assert_eq!(config.token.as_deref(), Some("jwt"));
}
