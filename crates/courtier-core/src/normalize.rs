//! Client and alert normalization
//!
//! Builds the canonical models from raw backend records. Each canonical
//! field is resolved through an ordered alias list covering the spellings
//! seen across API versions; numeric fields coerce through the extractor so
//! NaN never propagates. Normalization never fails — a field absent after
//! all aliases are tried resolves to its default.
//!
//! Normalizing an already-canonical record is a no-op: the canonical field
//! names are themselves the leading aliases.

use serde_json::Value;

use crate::extract::FieldMap;
use crate::models::{
    Alert, Client, ClientKind, MoralClient, PhysicalClient, Recommendation, SentMessage,
};

const REF_ALIASES: &[&str] = &["ref_personne", "ref", "id"];
const NAME_ALIASES: &[&str] = &["name", "nom_prenom", "full_name"];
const REC_ALIASES: &[&str] = &[
    "recommendations",
    "recommended_products",
    "recommendedproducts",
    "recommended",
];
const MESSAGE_ALIASES: &[&str] = &["messages"];
const LAST_CONTACT_ALIASES: &[&str] = &["last_contact", "lastcontact"];
const PHONE_ALIASES: &[&str] = &["phone", "telephone", "tele", "mobile"];
const EMAIL_ALIASES: &[&str] = &["email", "courriel", "mail"];
const CITY_ALIASES: &[&str] = &["city", "ville", "adresse_ville"];
const AGE_ALIASES: &[&str] = &["age"];
const RANK_ALIASES: &[&str] = &["rank"];
const SCORE_ALIASES: &[&str] = &["score", "client_score", "clientscore"];
const SEGMENT_ALIASES: &[&str] = &["segment", "client_segment"];
const RISK_ALIASES: &[&str] = &["risk_profile", "riskprofile", "business_risk"];
const PROFESSION_ALIASES: &[&str] = &["profession_group", "professiongroup"];
const FAMILY_ALIASES: &[&str] = &["situation_familiale", "situationfamiliale"];
const SECTOR_ALIASES: &[&str] = &[
    "secteur_activite",
    "secteur_activite_group",
    "secteuractivitegroup",
];
const RAISON_SOCIALE_ALIASES: &[&str] = &["raison_sociale", "raisonsociale"];
const CLIENT_SCORE_ALIASES: &[&str] = &["client_score", "clientscore", "score"];
const CLIENT_SEGMENT_ALIASES: &[&str] = &["client_segment", "segment"];
const BUDGET_ALIASES: &[&str] = &["estimated_budget", "estimatedbudget", "budget_estime"];
const CAPITAL_ALIASES: &[&str] = &["total_capital_assured", "totalcapitalassured"];
const PREMIUMS_ALIASES: &[&str] = &["total_premiums_paid", "totalpremiumspaid"];

/// Normalize one raw backend record into a canonical client
pub fn normalize_client(raw: &Value, kind: ClientKind) -> Client {
    match kind {
        ClientKind::Physical => Client::Physical(normalize_physical(raw)),
        ClientKind::Moral => Client::Moral(normalize_moral(raw)),
    }
}

/// Normalize a raw individual-client record
pub fn normalize_physical(raw: &Value) -> PhysicalClient {
    let map = FieldMap::new(raw);
    let reference = map.string(REF_ALIASES).unwrap_or_default();
    let name = map
        .string(NAME_ALIASES)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Ref {}", reference));

    PhysicalClient {
        name,
        age: map.number(AGE_ALIASES),
        city: map.string(CITY_ALIASES),
        phone: map.string(PHONE_ALIASES),
        email: map.string(EMAIL_ALIASES),
        segment: map.string(SEGMENT_ALIASES),
        risk_profile: map.string(RISK_ALIASES),
        score: map.number(SCORE_ALIASES),
        rank: map.number(RANK_ALIASES),
        profession_group: map.string(PROFESSION_ALIASES),
        situation_familiale: map.string(FAMILY_ALIASES),
        secteur_activite: map.string(SECTOR_ALIASES),
        recommendations: normalize_recommendations(&map, &reference),
        last_contact: normalize_last_contact(&map),
        messages: normalize_messages(map.array(MESSAGE_ALIASES).unwrap_or(&[]), &reference),
        ref_personne: reference,
    }
}

/// Normalize a raw corporate-client record
pub fn normalize_moral(raw: &Value) -> MoralClient {
    let map = FieldMap::new(raw);
    let reference = map.string(REF_ALIASES).unwrap_or_default();

    MoralClient {
        raison_sociale: map.string(RAISON_SOCIALE_ALIASES),
        phone: map.string(PHONE_ALIASES),
        email: map.string(EMAIL_ALIASES),
        client_score: map.number(CLIENT_SCORE_ALIASES),
        client_segment: map.string(CLIENT_SEGMENT_ALIASES),
        risk_profile: map.string(RISK_ALIASES),
        estimated_budget: map.number(BUDGET_ALIASES),
        total_capital_assured: map.number(CAPITAL_ALIASES),
        total_premiums_paid: map.number(PREMIUMS_ALIASES),
        recommendations: normalize_recommendations(&map, &reference),
        last_contact: normalize_last_contact(&map),
        messages: normalize_messages(map.array(MESSAGE_ALIASES).unwrap_or(&[]), &reference),
        ref_personne: reference,
    }
}

/// Normalize a raw alert record
pub fn normalize_alert(raw: &Value) -> Alert {
    let map = FieldMap::new(raw);

    Alert {
        ref_personne: map.string(REF_ALIASES).unwrap_or_default(),
        alert_type: map.string(&["alert_type", "alerttype"]).unwrap_or_default(),
        alert_message: map
            .string(&["alert_message", "alertmessage"])
            .unwrap_or_default(),
        alert_severity: map
            .string(&["alert_severity", "alertseverity", "severity"])
            .unwrap_or_else(|| "High".to_string()),
        product: map.string(&["product"]),
        expiration_date: map.string(&["expiration_date", "expirationdate"]),
        days_until_expiry: map.number(&["days_until_expiry", "daysuntilexpiry"]),
    }
}

fn normalize_last_contact(map: &FieldMap) -> Option<crate::models::Channel> {
    map.string(LAST_CONTACT_ALIASES)
        .and_then(|s| s.parse().ok())
}

/// Normalize the recommendation list
///
/// Bare strings (legacy) upgrade to `{product: s, label: s}` with the
/// default pending status and no invented score. Objects map field-by-field,
/// preserving the original value in `raw` for round-tripping on save.
pub fn normalize_recommendations(map: &FieldMap, reference: &str) -> Vec<Recommendation> {
    map.array(REC_ALIASES)
        .unwrap_or(&[])
        .iter()
        .map(|entry| normalize_recommendation(entry, reference))
        .collect()
}

fn normalize_recommendation(entry: &Value, reference: &str) -> Recommendation {
    if let Value::String(s) = entry {
        return Recommendation {
            product: s.clone(),
            label: Some(s.clone()),
            score: None,
            status: Default::default(),
            contacts: Vec::new(),
            messages: Vec::new(),
            raw: Some(entry.clone()),
        };
    }

    let map = FieldMap::new(entry);
    let product = map
        .string(&["product", "label", "product_id"])
        // Nothing product-shaped on the object; keep its compact form so
        // the entry is still addressable rather than silently dropped
        .unwrap_or_else(|| entry.to_string());
    // Mirror the resolved product when no label-shaped key exists, like the
    // bare-string path does; the canonical form is then a fixed point of
    // normalization even for product_id-only entries.
    let label = map
        .string(&["label", "product"])
        .unwrap_or_else(|| product.clone());

    Recommendation {
        label: Some(label),
        score: map.number(&["score"]),
        status: map
            .string(&["status"])
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        contacts: map
            .array(&["contacts"])
            .unwrap_or(&[])
            .iter()
            .filter_map(|c| c.as_str().and_then(|s| s.parse().ok()))
            .collect(),
        messages: normalize_messages(map.array(MESSAGE_ALIASES).unwrap_or(&[]), reference),
        raw: match map.get(&["raw"]) {
            Some(preserved) => Some(preserved.clone()),
            None => Some(entry.clone()),
        },
        product,
    }
}

/// Normalize prior-message entries
///
/// Accepts full message objects and bare strings (legacy rows carry plain
/// text only). Entries with no text are dropped. Legacy entries get a fresh
/// id and a normalization-time timestamp; canonical entries keep theirs.
pub fn normalize_messages(entries: &[Value], reference: &str) -> Vec<SentMessage> {
    entries
        .iter()
        .filter_map(|entry| normalize_message(entry, reference))
        .collect()
}

fn normalize_message(entry: &Value, reference: &str) -> Option<SentMessage> {
    if let Value::String(text) = entry {
        if text.trim().is_empty() {
            return None;
        }
        return Some(SentMessage::new(reference, Default::default(), text));
    }

    let map = FieldMap::new(entry);
    let content = map.string(&["content", "body"])?;
    if content.trim().is_empty() {
        return None;
    }

    let mut message = SentMessage::new(
        &map.string(&["clientref", "client_ref", "ref_personne"])
            .unwrap_or_else(|| reference.to_string()),
        map.string(&["channel"])
            .and_then(|c| c.parse().ok())
            .unwrap_or_default(),
        &content,
    );
    if let Some(id) = map.string(&["id"]) {
        message.id = id;
    }
    if let Some(sent_at) = map
        .string(&["sentat", "sent_at"])
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
    {
        message.sent_at = sent_at.with_timezone(&chrono::Utc);
    }
    Some(message)
}
