//! Test utilities for courtier-core
//!
//! This module provides testing infrastructure including a mock CRM backend
//! that serves the listing, detail, history, generation and send endpoints
//! for development and integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

#[derive(Default)]
struct MockState {
    physical: Vec<Value>,
    moral: Vec<Value>,
    alerts: Vec<Value>,
    history: HashMap<String, Vec<Value>>,
    reply: String,
    fail_sends: bool,
    generate_payloads: Vec<Value>,
    whatsapp_payloads: Vec<Value>,
    email_payloads: Vec<Value>,
}

type SharedState = Arc<Mutex<MockState>>;

/// Mock CRM backend for testing and development
///
/// Seed it with raw backend-shaped rows, point a client at `url()`, then
/// inspect the payloads the pipeline posted back.
pub struct MockCrmServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCrmServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState {
            reply: "Hello! Our new offer could be a great fit for you. Interested?".to_string(),
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/clients/physique", get(handle_list_physical))
            .route("/clients/morale", get(handle_list_moral))
            .route("/clients/:reference", get(handle_client_details))
            .route("/alerts", get(handle_list_alerts))
            .route("/history/:reference/messages", get(handle_history_messages))
            .route("/generate", post(handle_generate))
            .route("/whatsapp/send_whatsapp", post(handle_send_whatsapp))
            .route("/email/send_email", post(handle_send_email))
            .route("/openapi.json", get(handle_openapi))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Seed a raw physical client row, exactly as the backend would ship it
    pub fn seed_physical(&self, row: Value) {
        self.state.lock().unwrap().physical.push(row);
    }

    /// Seed a raw moral client row
    pub fn seed_moral(&self, row: Value) {
        self.state.lock().unwrap().moral.push(row);
    }

    /// Seed a raw alert row
    pub fn seed_alert(&self, row: Value) {
        self.state.lock().unwrap().alerts.push(row);
    }

    /// Seed the message history served for one client reference
    pub fn seed_history(&self, reference: &str, messages: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .history
            .insert(reference.to_string(), messages);
    }

    /// Set the pitch the generation endpoint replies with
    pub fn set_reply(&self, reply: &str) {
        self.state.lock().unwrap().reply = reply.to_string();
    }

    /// Make both send endpoints answer 500 until reset
    pub fn fail_sends(&self, fail: bool) {
        self.state.lock().unwrap().fail_sends = fail;
    }

    /// Request bodies received by the generation endpoint, oldest first
    pub fn generate_payloads(&self) -> Vec<Value> {
        self.state.lock().unwrap().generate_payloads.clone()
    }

    /// Request bodies received by the WhatsApp send endpoint, oldest first
    pub fn whatsapp_payloads(&self) -> Vec<Value> {
        self.state.lock().unwrap().whatsapp_payloads.clone()
    }

    /// Request bodies received by the email send endpoint, oldest first
    pub fn email_payloads(&self) -> Vec<Value> {
        self.state.lock().unwrap().email_payloads.clone()
    }
}

impl Drop for MockCrmServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_list_physical(State(state): State<SharedState>) -> Json<Value> {
    let items = state.lock().unwrap().physical.clone();
    Json(json!({ "items": items, "has_more": false }))
}

async fn handle_list_moral(State(state): State<SharedState>) -> Json<Value> {
    let items = state.lock().unwrap().moral.clone();
    Json(json!({ "items": items, "has_more": false }))
}

async fn handle_list_alerts(State(state): State<SharedState>) -> Json<Value> {
    let items = state.lock().unwrap().alerts.clone();
    Json(json!({ "items": items, "has_more": false }))
}

fn row_reference(row: &Value) -> Option<String> {
    row.as_object().and_then(|map| {
        map.iter()
            .find(|(k, _)| k.to_lowercase() == "ref_personne")
            .and_then(|(_, v)| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    })
}

async fn handle_client_details(
    State(state): State<SharedState>,
    Path(reference): Path<String>,
) -> impl IntoResponse {
    let state = state.lock().unwrap();
    let physical = state
        .physical
        .iter()
        .find(|row| row_reference(row).as_deref() == Some(reference.as_str()));
    if let Some(row) = physical {
        return Json(json!({ "type": "physical", "data": row })).into_response();
    }
    let moral = state
        .moral
        .iter()
        .find(|row| row_reference(row).as_deref() == Some(reference.as_str()));
    match moral {
        Some(row) => Json(json!({ "type": "moral", "data": row })).into_response(),
        None => (StatusCode::NOT_FOUND, "Client not found").into_response(),
    }
}

async fn handle_history_messages(
    State(state): State<SharedState>,
    Path(reference): Path<String>,
) -> Json<Value> {
    let messages = state
        .lock()
        .unwrap()
        .history
        .get(&reference)
        .cloned()
        .unwrap_or_default();
    Json(Value::Array(messages))
}

async fn handle_generate(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.generate_payloads.push(payload);
    Json(json!({ "reply": state.reply }))
}

async fn handle_send_whatsapp(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    if state.fail_sends {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Twilio unavailable").into_response();
    }
    state.whatsapp_payloads.push(payload);
    Json(json!({ "status": "sent" })).into_response()
}

async fn handle_send_email(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    if state.fail_sends {
        return (StatusCode::INTERNAL_SERVER_ERROR, "SMTP unavailable").into_response();
    }
    state.email_payloads.push(payload);
    Json(json!({ "status": "sent" })).into_response()
}

async fn handle_openapi() -> Json<Value> {
    Json(json!({ "openapi": "3.1.0", "info": { "title": "mock-crm" } }))
}
