//! Pitch prompt assembly
//!
//! Builds the ordered, role-tagged instruction list sent to the generation
//! endpoint. The ordering is a firm contract: system constraints always
//! first, prior conversation always before the new instruction, and the
//! agent's free-text refinement always last.

use serde::{Deserialize, Serialize};

use crate::models::{Client, SentMessage};

/// Fixed tone/length/format constraints for every pitch
///
/// Channel-agnostic but email-safe: no headings, no signature, one short
/// call-to-action.
pub const SYSTEM_PROMPT: &str = "You are a concise sales assistant for an insurance agency. \
Write short, friendly commercial pitches of 2-3 sentences with a professional, helpful tone \
and exactly one short call-to-action (CTA). Never use headings, bullet points or signatures; \
the text must read well in both WhatsApp and email. Return only the pitch text \
(no extra commentary).";

/// One role-tagged instruction for the generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Assemble the instruction list for one pitch
///
/// Prior messages are replayed verbatim as assistant turns, in original send
/// order, to give the generator conversational memory. The personalization
/// clause only names fields actually present on the client; absent fields
/// never appear as empty placeholders.
pub fn assemble(
    client: &Client,
    product: &str,
    prior_messages: &[SentMessage],
    user_override: Option<&str>,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];

    for prior in prior_messages {
        if !prior.content.trim().is_empty() {
            messages.push(ChatMessage::assistant(prior.content.clone()));
        }
    }

    let who = who_clause(client);
    let details = detail_clauses(client);

    let mut task = format!(
        "Write a short, friendly commercial pitch (2-3 sentences) proposing \"{}\" to {}. ",
        product, who
    );
    if !details.is_empty() {
        task.push_str(&format!("Customer details: {}. ", details.join(", ")));
    }
    task.push_str(
        "Make the tone professional and helpful, include one short call-to-action (CTA), \
         and keep it suitable for WhatsApp or email. Return only the pitch text.",
    );
    messages.push(ChatMessage::user(task));

    if let Some(extra) = user_override {
        if !extra.trim().is_empty() {
            messages.push(ChatMessage::user(format!(
                "Additional instructions from the agent, refine the pitch accordingly: {}",
                extra
            )));
        }
    }

    messages
}

fn who_clause(client: &Client) -> String {
    match client {
        Client::Physical(c) => {
            let name = if c.name.trim().is_empty() {
                c.ref_personne.as_str()
            } else {
                c.name.as_str()
            };
            format!("customer {}", name)
        }
        Client::Moral(c) => format!(
            "company {}",
            c.raison_sociale.as_deref().unwrap_or(&c.ref_personne)
        ),
    }
}

fn detail_clauses(client: &Client) -> Vec<String> {
    let mut details = Vec::new();
    match client {
        Client::Physical(c) => {
            if let Some(age) = c.age {
                details.push(format!("age: {}", age as i64));
            }
            if let Some(ref city) = c.city {
                details.push(format!("city: {}", city));
            }
            if let Some(status) = c.segment.as_deref().or(c.risk_profile.as_deref()) {
                details.push(format!("status: {}", status));
            }
        }
        Client::Moral(c) => {
            if let Some(ref segment) = c.client_segment {
                details.push(format!("segment: {}", segment));
            }
            if let Some(ref risk) = c.risk_profile {
                details.push(format!("risk: {}", risk));
            }
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, MoralClient, PhysicalClient};

    fn physical(name: &str) -> Client {
        Client::Physical(PhysicalClient {
            ref_personne: "C001".into(),
            name: name.into(),
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
        })
    }

    #[test]
    fn system_constraints_always_come_first() {
        let messages = assemble(&physical("Yassine"), "Auto", &[], None);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("2-3 sentences"));
    }

    #[test]
    fn user_task_names_product_and_customer() {
        let messages = assemble(&physical("Yassine"), "Auto", &[], None);
        assert_eq!(messages.len(), 2);
        let task = &messages[1];
        assert_eq!(task.role, "user");
        assert!(task.content.contains("\"Auto\""));
        assert!(task.content.contains("customer Yassine"));
    }

    #[test]
    fn absent_fields_never_appear_as_empty_placeholders() {
        let messages = assemble(&physical("Yassine"), "Auto", &[], None);
        let task = &messages[1].content;
        assert!(!task.contains("Customer details"));
        assert!(!task.contains("age:"));
        assert!(!task.contains("city:"));
    }

    #[test]
    fn present_fields_personalize_the_task() {
        let mut client = physical("Amal");
        if let Client::Physical(ref mut c) = client {
            c.age = Some(37.0);
            c.city = Some("Sfax".into());
            c.segment = Some("Gold".into());
        }
        let messages = assemble(&client, "Santé", &[], None);
        let task = &messages[1].content;
        assert!(task.contains("age: 37"));
        assert!(task.contains("city: Sfax"));
        assert!(task.contains("status: Gold"));
    }

    #[test]
    fn prior_messages_replay_in_order_before_the_task() {
        let prior = vec![
            SentMessage::new("C001", Channel::Whatsapp, "first pitch"),
            SentMessage::new("C001", Channel::Email, "second pitch"),
        ];
        let messages = assemble(&physical("Yassine"), "Auto", &prior, None);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "first pitch");
        assert_eq!(messages[2].content, "second pitch");
        assert_eq!(messages[3].role, "user");
    }

    #[test]
    fn override_is_appended_last_and_verbatim() {
        let messages = assemble(
            &physical("Yassine"),
            "Auto",
            &[],
            Some("mention the spring discount"),
        );
        let last = messages.last().unwrap();
        assert_eq!(last.role, "user");
        assert!(last.content.contains("mention the spring discount"));
    }

    #[test]
    fn blank_override_is_ignored() {
        let messages = assemble(&physical("Yassine"), "Auto", &[], Some("   "));
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn moral_clients_are_addressed_as_companies() {
        let client = Client::Moral(MoralClient {
            ref_personne: "M001".into(),
            raison_sociale: Some("Acme SARL".into()),
            phone: None,
            email: None,
            client_score: None,
            client_segment: Some("SME".into()),
            risk_profile: Some("LOW_RISK".into()),
            estimated_budget: None,
            total_capital_assured: None,
            total_premiums_paid: None,
            recommendations: vec![],
            last_contact: None,
            messages: vec![],
        });
        let messages = assemble(&client, "Multirisque", &[], None);
        let task = &messages[1].content;
        assert!(task.contains("company Acme SARL"));
        assert!(task.contains("segment: SME"));
        assert!(task.contains("risk: LOW_RISK"));
    }
}
