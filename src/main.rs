//! Console transport: one chat session on stdin/stdout.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use gift_advisor::catalog::Dimension;
use gift_advisor::commands::{texts, BotCommand, Event, GiftAdvisor, Reply};
use gift_advisor::config::resolve_config;
use gift_advisor::conversation::SessionId;
use gift_advisor::inference::InferenceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = resolve_config(&cwd)?;
    gift_advisor::init_tracing(&config.logging).context("failed to initialise logging")?;

    tracing::info!(
        base_url = %config.service.base_url,
        model = %config.service.model,
        idle_timeout_mins = config.sessions.idle_timeout_mins,
        "configuration loaded"
    );

    let client = InferenceClient::from_config(config.service.clone())?;
    let advisor = GiftAdvisor::new(Arc::new(client), &config.sessions);
    let session_id = SessionId::new(uuid::Uuid::new_v4().to_string());

    println!("{}\n", texts::WELCOME);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let pruned = advisor.prune_idle().await;
        if pruned > 0 {
            tracing::debug!(pruned, "dropped idle sessions");
        }

        let reply = dispatch(&advisor, &session_id, line).await;
        println!("{reply}\n");
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Turn one input line into reply text.
async fn dispatch(advisor: &GiftAdvisor, session_id: &SessionId, line: &str) -> String {
    if let Some(command) = BotCommand::parse(line) {
        return match command {
            BotCommand::Start => texts::WELCOME.to_string(),
            BotCommand::Help => texts::HELP.to_string(),
            BotCommand::Shop => texts::SHOP.to_string(),
            BotCommand::Reco => advisor
                .handle(session_id, Event::StartCollection)
                .await
                .render_text(),
            BotCommand::Note(text) => advisor
                .handle(session_id, Event::FreeTextNote(text))
                .await
                .render_text(),
        };
    }

    if line.starts_with('/') {
        return texts::HELP.to_string();
    }

    // Raw callback data, e.g. "budget_low".
    if let Some((dimension, key)) = Dimension::parse_callback(line) {
        let event = Event::SelectionMade {
            dimension,
            key: key.to_string(),
        };
        return advisor.handle(session_id, event).await.render_text();
    }

    let Some(prompt) = advisor.current_prompt(session_id).await else {
        return Reply::NoActiveSession.render_text();
    };
    let key = prompt.resolve(line).map_or(line, |entry| entry.key);
    let event = Event::SelectionMade {
        dimension: prompt.dimension,
        key: key.to_string(),
    };
    advisor.handle(session_id, event).await.render_text()
}
