//! Outreach state reducer
//!
//! Pure function from a client collection plus one sent message to a new
//! collection. Callers own persistence and rendering; the reducer never
//! touches the network and never mutates its input, so a failed dispatch
//! simply means it is never called and prior state survives untouched.

use crate::models::{Channel, Client, Recommendation, SentMessage};

/// Fold a successfully sent message into the client collection
///
/// The message lands on the recommendation whose product matches `product`
/// (case-insensitive, label accepted). Clients and recommendations the
/// message does not concern are returned unchanged. When no recommendation
/// matches, the message is kept on the client's flat history list so it
/// still shows up in the timeline.
pub fn apply_sent(clients: &[Client], product: &str, sent: &SentMessage) -> Vec<Client> {
    clients
        .iter()
        .map(|client| {
            if client.reference() != sent.client_ref {
                return client.clone();
            }
            let mut updated = client.clone();
            match &mut updated {
                Client::Physical(c) => record(
                    &mut c.recommendations,
                    &mut c.messages,
                    &mut c.last_contact,
                    product,
                    sent,
                ),
                Client::Moral(c) => record(
                    &mut c.recommendations,
                    &mut c.messages,
                    &mut c.last_contact,
                    product,
                    sent,
                ),
            }
            updated
        })
        .collect()
}

fn record(
    recommendations: &mut [Recommendation],
    messages: &mut Vec<SentMessage>,
    last_contact: &mut Option<Channel>,
    product: &str,
    sent: &SentMessage,
) {
    match recommendations.iter_mut().find(|r| matches_product(r, product)) {
        Some(rec) => {
            rec.messages.push(sent.clone());
            if !rec.contacts.contains(&sent.channel) {
                rec.contacts.push(sent.channel);
            }
        }
        None => messages.push(sent.clone()),
    }
    *last_contact = Some(sent.channel);
}

fn matches_product(rec: &Recommendation, product: &str) -> bool {
    rec.product.eq_ignore_ascii_case(product)
        || rec
            .label
            .as_deref()
            .is_some_and(|label| label.eq_ignore_ascii_case(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhysicalClient, RecommendationStatus};

    fn rec(product: &str) -> Recommendation {
        Recommendation {
            product: product.into(),
            label: None,
            score: None,
            status: RecommendationStatus::Pending,
            contacts: vec![],
            messages: vec![],
            raw: None,
        }
    }

    fn client(reference: &str, recommendations: Vec<Recommendation>) -> Client {
        Client::Physical(PhysicalClient {
            ref_personne: reference.into(),
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
            recommendations,
            last_contact: None,
            messages: vec![],
        })
    }

    #[test]
    fn message_lands_on_the_matching_recommendation() {
        let clients = vec![
            client("C001", vec![rec("Auto"), rec("Habitation")]),
            client("C002", vec![rec("Auto")]),
        ];
        let sent = SentMessage::new("C001", Channel::Whatsapp, "hello");

        let updated = apply_sent(&clients, "auto", &sent);

        let recs = updated[0].recommendations();
        assert_eq!(recs[0].messages, vec![sent.clone()]);
        assert_eq!(recs[0].contacts, vec![Channel::Whatsapp]);
        assert!(recs[1].messages.is_empty());
        assert_eq!(updated[0].last_contact(), Some(Channel::Whatsapp));

        // Other clients are untouched
        assert_eq!(updated[1], clients[1]);
    }

    #[test]
    fn input_collection_is_not_mutated() {
        let clients = vec![client("C001", vec![rec("Auto")])];
        let before = clients.clone();
        let sent = SentMessage::new("C001", Channel::Email, "hello");

        let _ = apply_sent(&clients, "Auto", &sent);

        assert_eq!(clients, before);
    }

    #[test]
    fn unmatched_product_falls_back_to_flat_history() {
        let clients = vec![client("C001", vec![rec("Auto")])];
        let sent = SentMessage::new("C001", Channel::Email, "hello");

        let updated = apply_sent(&clients, "Voyage", &sent);

        assert!(updated[0].recommendations()[0].messages.is_empty());
        assert_eq!(updated[0].messages(), &[sent]);
        assert_eq!(updated[0].last_contact(), Some(Channel::Email));
    }

    #[test]
    fn repeat_sends_do_not_duplicate_the_contact_channel() {
        let clients = vec![client("C001", vec![rec("Auto")])];
        let first = SentMessage::new("C001", Channel::Whatsapp, "one");
        let second = SentMessage::new("C001", Channel::Whatsapp, "two");

        let updated = apply_sent(&apply_sent(&clients, "Auto", &first), "Auto", &second);

        let rec = &updated[0].recommendations()[0];
        assert_eq!(rec.messages.len(), 2);
        assert_eq!(rec.contacts, vec![Channel::Whatsapp]);
    }

    #[test]
    fn label_match_is_accepted() {
        let mut labelled = rec("AUTO-01");
        labelled.label = Some("Assurance Auto".into());
        let clients = vec![client("C001", vec![labelled])];
        let sent = SentMessage::new("C001", Channel::Whatsapp, "hello");

        let updated = apply_sent(&clients, "assurance auto", &sent);

        assert_eq!(updated[0].recommendations()[0].messages.len(), 1);
    }
}
