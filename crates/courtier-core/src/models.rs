//! Domain models for Courtier
//!
//! Canonical shapes produced by normalization. Raw backend rows arrive as
//! `serde_json::Value` with inconsistent field casing across API versions;
//! everything downstream of the normalizer works with these types only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outreach delivery medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Primary outreach channel; legacy message entries without a channel
    /// are attributed here.
    #[default]
    Whatsapp,
    Email,
    Phone,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" => Ok(Self::Whatsapp),
            "email" | "mail" => Ok(Self::Email),
            "phone" | "tel" => Ok(Self::Phone),
            _ => Err(format!("Unknown channel: {}", s)),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Acceptance state of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
    NotContacted,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
            Self::NotContacted => "not_contacted",
        }
    }
}

impl std::str::FromStr for RecommendationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "refused" => Ok(Self::Refused),
            "not_contacted" | "notcontacted" => Ok(Self::NotContacted),
            _ => Err(format!("Unknown recommendation status: {}", s)),
        }
    }
}

impl std::fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message sent to a client over an outreach channel
///
/// Immutable once created; message lists are append-only and only the
/// outreach reducer appends to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: String,
    #[serde(rename = "clientRef")]
    pub client_ref: String,
    pub channel: Channel,
    pub content: String,
    #[serde(rename = "sentAt")]
    pub sent_at: DateTime<Utc>,
}

impl SentMessage {
    /// Create a message stamped with a fresh id and the current time
    pub fn new(client_ref: &str, channel: Channel, content: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            client_ref: client_ref.to_string(),
            channel,
            content: content.to_string(),
            sent_at: Utc::now(),
        }
    }
}

/// A product suggested for a client
///
/// Raw backend entries may be bare strings (legacy) or objects; both
/// normalize to this shape. The original backend value is preserved in `raw`
/// so edits can round-trip to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Score in [0, 100] when the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: RecommendationStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<SentMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

/// An individual policyholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalClient {
    pub ref_personne: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation_familiale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secteur_activite: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<SentMessage>,
}

/// A corporate/entity policyholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoralClient {
    pub ref_personne: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raison_sociale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_segment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capital_assured: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_premiums_paid: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<SentMessage>,
}

impl MoralClient {
    /// Score to display: first recommendation carrying a score, else the
    /// backend-computed client score
    pub fn display_score(&self) -> Option<f64> {
        self.recommendations
            .iter()
            .find_map(|r| r.score)
            .or(self.client_score)
    }
}

/// Canonical client record
///
/// `ref_personne` is a non-empty stable identifier, unique within a listing
/// page. It is the join key between client rows, alerts and message history
/// and is never regenerated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Client {
    #[serde(rename = "physique")]
    Physical(PhysicalClient),
    #[serde(rename = "moral")]
    Moral(MoralClient),
}

impl Client {
    pub fn kind(&self) -> ClientKind {
        match self {
            Self::Physical(_) => ClientKind::Physical,
            Self::Moral(_) => ClientKind::Moral,
        }
    }

    pub fn reference(&self) -> &str {
        match self {
            Self::Physical(c) => &c.ref_personne,
            Self::Moral(c) => &c.ref_personne,
        }
    }

    /// Display name with a `Ref {ref}` fallback when the record has none
    pub fn display_name(&self) -> String {
        match self {
            Self::Physical(c) => c.name.clone(),
            Self::Moral(c) => c
                .raison_sociale
                .clone()
                .unwrap_or_else(|| format!("Ref {}", c.ref_personne)),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Physical(c) => c.phone.as_deref(),
            Self::Moral(c) => c.phone.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Physical(c) => c.email.as_deref(),
            Self::Moral(c) => c.email.as_deref(),
        }
    }

    /// Ranking position, where the backend provides one (physical only)
    pub fn rank(&self) -> Option<f64> {
        match self {
            Self::Physical(c) => c.rank,
            Self::Moral(_) => None,
        }
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::Physical(c) => &c.recommendations,
            Self::Moral(c) => &c.recommendations,
        }
    }

    pub fn last_contact(&self) -> Option<Channel> {
        match self {
            Self::Physical(c) => c.last_contact,
            Self::Moral(c) => c.last_contact,
        }
    }

    pub fn messages(&self) -> &[SentMessage] {
        match self {
            Self::Physical(c) => &c.messages,
            Self::Moral(c) => &c.messages,
        }
    }
}

/// Which client population an operation targets
///
/// The backend is inconsistent about naming: list endpoints use
/// `physique`/`morale`, the detail endpoint reports `physical`/`moral`.
/// `from_str` accepts all four spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Physical,
    Moral,
}

impl ClientKind {
    /// Path segment used by the list endpoints
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Physical => "physique",
            Self::Moral => "morale",
        }
    }
}

impl std::str::FromStr for ClientKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "physique" | "physical" => Ok(Self::Physical),
            "moral" | "morale" => Ok(Self::Moral),
            _ => Err(format!("Unknown client kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// A time-sensitive notification keyed by the same `ref_personne` as a
/// client but fetched and paged separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub ref_personne: String,
    pub alert_type: String,
    pub alert_message: String,
    pub alert_severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<f64>,
}

/// One page of a listing endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn channel_round_trips_through_serde() {
        let json = serde_json::to_string(&Channel::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Channel::Whatsapp);
    }

    #[test]
    fn client_kind_accepts_both_backend_spellings() {
        assert_eq!(
            ClientKind::from_str("physical").unwrap(),
            ClientKind::Physical
        );
        assert_eq!(
            ClientKind::from_str("physique").unwrap(),
            ClientKind::Physical
        );
        assert_eq!(ClientKind::from_str("morale").unwrap(), ClientKind::Moral);
        assert_eq!(ClientKind::from_str("moral").unwrap(), ClientKind::Moral);
        assert!(ClientKind::from_str("alien").is_err());
    }

    #[test]
    fn client_serializes_with_type_tag() {
        let client = Client::Physical(PhysicalClient {
            ref_personne: "C001".into(),
            name: "Yassine".into(),
            age: None,
            city: None,
            phone: None,
            email: None,
            segment: None,
            risk_profile: None,
            score: None,
            rank: None,
            profession_group: None,
            situation_familiale: None,
            secteur_activite: None,
            recommendations: vec![],
            last_contact: None,
            messages: vec![],
        });

        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["type"], "physique");
        assert_eq!(value["ref_personne"], "C001");
    }

    #[test]
    fn moral_display_score_prefers_recommendation_score() {
        let client = MoralClient {
            ref_personne: "M001".into(),
            raison_sociale: Some("Acme SARL".into()),
            phone: None,
            email: None,
            client_score: Some(40.0),
            client_segment: None,
            risk_profile: None,
            estimated_budget: None,
            total_capital_assured: None,
            total_premiums_paid: None,
            recommendations: vec![
                Recommendation {
                    product: "Multirisque".into(),
                    label: None,
                    score: None,
                    status: RecommendationStatus::Pending,
                    contacts: vec![],
                    messages: vec![],
                    raw: None,
                },
                Recommendation {
                    product: "Flotte".into(),
                    label: None,
                    score: Some(72.0),
                    status: RecommendationStatus::Pending,
                    contacts: vec![],
                    messages: vec![],
                    raw: None,
                },
            ],
            last_contact: None,
            messages: vec![],
        };

        assert_eq!(client.display_score(), Some(72.0));
    }
}
