//! Channel dispatch
//!
//! Shapes a channel-specific payload for a finished pitch and calls the
//! corresponding send endpoint. A send attempt moves Idle -> Sending ->
//! Sent | Failed; the Sending phase is tracked in a per-reference in-flight
//! registry so a duplicate dispatch for the same client fails fast instead
//! of racing an advisory busy flag. Failures leave prior state untouched;
//! every retry is a fresh send (deduplication, if any, is a backend
//! concern).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Channel, Client, RecommendationStatus, SentMessage};
use crate::recommend::{pick_active, product_for};

/// Country code the WhatsApp provider prepends to normalized numbers
const COUNTRY_CODE: &str = "216";

/// Snapshot of the active recommendation carried on every send payload
///
/// Lets the backend persist outreach history without a second round trip.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSnapshot {
    pub product: String,
    pub status: RecommendationStatus,
    pub contact_method: Channel,
}

#[derive(Debug, Serialize)]
struct WhatsAppPayload<'a> {
    phone_number: String,
    message: &'a str,
    ref_personne: &'a str,
    recommendations: Vec<RecommendationSnapshot>,
}

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    recipient: &'a str,
    subject: String,
    body: &'a str,
    ref_personne: &'a str,
    rank: i64,
    recommendations: Vec<RecommendationSnapshot>,
}

/// Dispatches finished pitches over WhatsApp or email
#[derive(Clone)]
pub struct Dispatcher {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Releases the in-flight slot for one reference when the attempt ends
struct InFlightGuard {
    registry: Arc<Mutex<HashSet<String>>>,
    reference: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.registry.lock() {
            set.remove(&self.reference);
        }
    }
}

impl Dispatcher {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.token.as_deref())
    }

    /// Send `message` to `client` over `channel`
    ///
    /// Returns the sent message on success. On failure nothing is mutated;
    /// the caller surfaces the error and may retry manually.
    pub async fn dispatch(
        &self,
        channel: Channel,
        client: &Client,
        message: &str,
    ) -> Result<SentMessage> {
        let reference = client.reference().to_string();
        let _guard = self.try_begin(&reference)?;

        let snapshot = active_snapshot(client, channel);
        match channel {
            Channel::Whatsapp => self.send_whatsapp(client, message, snapshot).await?,
            Channel::Email => self.send_email(client, message, snapshot).await?,
            Channel::Phone => {
                return Err(Error::InvalidData(
                    "phone is a history channel with no send endpoint".into(),
                ))
            }
        }

        Ok(SentMessage::new(&reference, channel, message))
    }

    /// Claim the in-flight slot for a reference
    ///
    /// Fails when a send for the same reference has not finished yet, which
    /// makes duplicate rapid dispatches deterministic instead of a UI race.
    fn try_begin(&self, reference: &str) -> Result<InFlightGuard> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| Error::InvalidData("in-flight registry lock poisoned".into()))?;
        if !set.insert(reference.to_string()) {
            return Err(Error::InFlight(reference.to_string()));
        }
        Ok(InFlightGuard {
            registry: self.in_flight.clone(),
            reference: reference.to_string(),
        })
    }

    async fn send_whatsapp(
        &self,
        client: &Client,
        message: &str,
        snapshot: RecommendationSnapshot,
    ) -> Result<()> {
        let phone = client.phone().ok_or_else(|| Error::MissingRecipient {
            channel: Channel::Whatsapp,
            reference: client.reference().to_string(),
        })?;

        let payload = WhatsAppPayload {
            phone_number: normalize_phone(phone),
            message,
            ref_personne: client.reference(),
            recommendations: vec![snapshot],
        };
        debug!(reference = %client.reference(), "Sending WhatsApp payload");

        self.post(Channel::Whatsapp, "/whatsapp/send_whatsapp", &payload)
            .await
    }

    async fn send_email(
        &self,
        client: &Client,
        message: &str,
        snapshot: RecommendationSnapshot,
    ) -> Result<()> {
        let recipient = client.email().ok_or_else(|| Error::MissingRecipient {
            channel: Channel::Email,
            reference: client.reference().to_string(),
        })?;

        let payload = EmailPayload {
            recipient,
            subject: subject_for(&snapshot.product),
            body: message,
            ref_personne: client.reference(),
            rank: client.rank().map(|r| r as i64).unwrap_or(0),
            recommendations: vec![snapshot],
        };
        debug!(reference = %client.reference(), "Sending email payload");

        self.post(Channel::Email, "/email/send_email", &payload).await
    }

    async fn post<T: Serialize>(&self, channel: Channel, path: &str, payload: &T) -> Result<()> {
        let mut builder = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .json(payload);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Dispatch {
                channel,
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Snapshot of the client's active recommendation for the send payload
fn active_snapshot(client: &Client, channel: Channel) -> RecommendationSnapshot {
    let active = pick_active(client.recommendations());
    RecommendationSnapshot {
        product: product_for(active).to_string(),
        status: RecommendationStatus::Pending,
        contact_method: channel,
    }
}

/// Subject line derived from the active product
pub fn subject_for(product: &str) -> String {
    format!("Quick proposal: {}", product)
}

/// Normalize a phone number to the local form the provider expects
///
/// Strips formatting characters (spaces, dashes, parentheses, dots, plus),
/// then a leading country code or a leading trunk zero. The provider adds
/// the country prefix itself.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.' | '+'))
        .collect();

    if digits.len() > 8 && digits.starts_with(COUNTRY_CODE) {
        digits[COUNTRY_CODE.len()..].to_string()
    } else if digits.len() > 1 && digits.starts_with('0') {
        digits[1..].to_string()
    } else {
        digits
    }
}
