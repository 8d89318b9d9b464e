//! Pitch generation and send command implementations

use std::io::{self, BufRead, Write};

use anyhow::Result;
use courtier_core::{
    apply_sent, assemble, pick_active, product_for, ApiClient, Channel, Client, Config,
    Dispatcher, PitchClient,
};
use tracing::info;

/// Fetch a client, resolve the product to pitch and assemble the prompt
async fn prepare(
    api: &ApiClient,
    reference: &str,
    product: Option<&str>,
    instructions: Option<&str>,
) -> Result<(Client, String, Vec<courtier_core::ChatMessage>)> {
    let client = api.client_details(reference).await?;
    let history = api.history_messages(reference).await?;

    let product = match product {
        Some(p) => p.to_string(),
        None => product_for(pick_active(client.recommendations())).to_string(),
    };
    let messages = assemble(&client, &product, &history, instructions);

    Ok((client, product, messages))
}

pub async fn cmd_pitch(
    config: &Config,
    reference: &str,
    product: Option<&str>,
    instructions: Option<&str>,
) -> Result<()> {
    let api = ApiClient::from_config(config);
    let pitch = PitchClient::from_config(config);

    let (client, product, messages) = prepare(&api, reference, product, instructions).await?;
    info!(reference = %client.reference(), product = %product, "Generating pitch");

    let reply = pitch.generate_default(&messages).await?;

    println!();
    println!("✉️  Pitch for {} — {}", client.display_name(), product);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", reply);
    println!();
    println!(
        "   Send it with: courtier send {} --channel whatsapp",
        reference
    );

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_send(
    config: &Config,
    reference: &str,
    channel: &str,
    product: Option<&str>,
    instructions: Option<&str>,
    message: Option<&str>,
    yes: bool,
) -> Result<()> {
    let channel: Channel = channel.parse().map_err(anyhow::Error::msg)?;

    let api = ApiClient::from_config(config);
    let dispatcher = Dispatcher::from_config(config);

    let (client, product, prompt) = prepare(&api, reference, product, instructions).await?;

    let text = match message {
        Some(text) => text.to_string(),
        None => {
            let pitch = PitchClient::from_config(config);
            pitch.generate_default(&prompt).await?
        }
    };

    println!();
    println!(
        "✉️  Sending to {} over {} — {}",
        client.display_name(),
        channel,
        product
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", text);
    println!();

    if !yes && !confirm("   Send this message? [y/N] ")? {
        println!("   Aborted; nothing was sent.");
        return Ok(());
    }

    let sent = dispatcher.dispatch(channel, &client, &text).await?;
    let updated = apply_sent(&[client], &product, &sent);

    println!("✅ Sent at {}", sent.sent_at.format("%Y-%m-%d %H:%M:%S"));
    if let Some(rec) = updated[0]
        .recommendations()
        .iter()
        .find(|r| !r.messages.is_empty())
    {
        println!(
            "   {} now has {} message(s), contacted over: {}",
            rec.product,
            rec.messages.len(),
            rec.contacts
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
