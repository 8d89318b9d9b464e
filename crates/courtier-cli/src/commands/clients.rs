//! Client and alert listing command implementations

use anyhow::Result;
use courtier_core::{
    pick_active, product_for, AlertQuery, AlertSort, ApiClient, Client, ClientKind, ClientQuery,
    ClientSort, Config, SortDir,
};

use super::truncate;

fn score_of(client: &Client) -> Option<f64> {
    match client {
        Client::Physical(c) => c.score,
        Client::Moral(c) => c.display_score(),
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_clients(
    config: &Config,
    kind: &str,
    limit: u32,
    offset: u32,
    sort: &str,
    dir: &str,
    segment: Option<&str>,
    risk: Option<&str>,
) -> Result<()> {
    let kind: ClientKind = kind.parse().map_err(anyhow::Error::msg)?;
    let sort: ClientSort = sort.parse().map_err(anyhow::Error::msg)?;
    let dir: SortDir = dir.parse().map_err(anyhow::Error::msg)?;

    let api = ApiClient::from_config(config);
    let query = ClientQuery::new(kind)
        .limit(limit)
        .offset(offset)
        .sort_by(sort)
        .sort_dir(dir)
        .segment(segment)
        .risk(risk);
    let page = api.list_clients(&query).await?;

    if page.items.is_empty() {
        println!("No {} clients found.", kind);
        return Ok(());
    }

    println!();
    println!(
        "👥 Clients ({}) — sorted by {} {}",
        kind,
        sort.as_str(),
        dir.as_str()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for client in &page.items {
        let score = score_of(client)
            .map(|s| format!("{:>5.1}", s))
            .unwrap_or_else(|| "    —".to_string());
        let product = product_for(pick_active(client.recommendations()));

        println!(
            "   {:<10} │ {} │ {:<28} │ {}",
            client.reference(),
            score,
            truncate(&client.display_name(), 28),
            truncate(product, 30)
        );
    }

    if page.has_more {
        println!();
        println!(
            "   More results available. Use --offset {} for the next page.",
            offset + limit
        );
    }

    Ok(())
}

pub async fn cmd_alerts(
    config: &Config,
    limit: u32,
    offset: u32,
    sort: &str,
    dir: &str,
    alert_type: Option<&str>,
    product: Option<&str>,
) -> Result<()> {
    let sort: AlertSort = sort.parse().map_err(anyhow::Error::msg)?;
    let dir: SortDir = dir.parse().map_err(anyhow::Error::msg)?;

    let api = ApiClient::from_config(config);
    let query = AlertQuery::new()
        .limit(limit)
        .offset(offset)
        .sort_by(sort)
        .sort_dir(dir)
        .alert_type(alert_type)
        .product(product);
    let page = api.list_alerts(&query).await?;

    if page.items.is_empty() {
        println!("No alerts found.");
        return Ok(());
    }

    println!();
    println!("🔔 Alerts — sorted by {} {}", sort.as_str(), dir.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in &page.items {
        let expiry = alert
            .days_until_expiry
            .map(|d| format!("{:>4} d", d as i64))
            .unwrap_or_else(|| "     —".to_string());

        println!(
            "   {:<10} │ {:<8} │ {} │ {}",
            alert.ref_personne,
            truncate(&alert.alert_severity, 8),
            expiry,
            truncate(&alert.alert_message, 45)
        );
    }

    if page.has_more {
        println!();
        println!(
            "   More results available. Use --offset {} for the next page.",
            offset + limit
        );
    }

    Ok(())
}

pub async fn cmd_show(config: &Config, reference: &str) -> Result<()> {
    let api = ApiClient::from_config(config);
    let client = api.client_details(reference).await?;

    println!();
    println!("👤 {} ({})", client.display_name(), client.kind());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Reference: {}", client.reference());
    if let Some(phone) = client.phone() {
        println!("   Phone:     {}", phone);
    }
    if let Some(email) = client.email() {
        println!("   Email:     {}", email);
    }
    if let Some(score) = score_of(&client) {
        println!("   Score:     {:.1}", score);
    }
    if let Some(channel) = client.last_contact() {
        println!("   Last contact over {}", channel);
    }

    let recommendations = client.recommendations();
    if recommendations.is_empty() {
        println!();
        println!("   No recommendations on record.");
        return Ok(());
    }

    println!();
    println!("   Recommendations:");
    for (i, rec) in recommendations.iter().enumerate() {
        let marker = if i == 0 { "▶" } else { " " };
        let score = rec
            .score
            .map(|s| format!(" ({:.1})", s))
            .unwrap_or_default();
        println!(
            "   {} {} [{}]{} — {} message(s)",
            marker,
            rec.label.as_deref().unwrap_or(&rec.product),
            rec.status,
            score,
            rec.messages.len()
        );
    }

    Ok(())
}
