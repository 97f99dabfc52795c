//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix gateway, Wikipedia resolver
//! - Application: Filter, Registry, Router
//! - Interface: Command Handlers

#![recursion_limit = "256"]

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::fs;
use std::sync::Arc;

use crate::application::filter::BotIdentity;
use crate::application::registry::CommandRegistry;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::types::InboundMessage;
use crate::infrastructure::matrix::MatrixService;
use crate::infrastructure::wiki::WikiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Configuration
    let config_content =
        fs::read_to_string("data/config.yaml").context("Failed to read config.yaml")?;
    let config: AppConfig =
        serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting WikiBot...");

    // 3. Matrix Setup
    // The password is a process-wide secret; it stays out of the config file
    // and out of the logs.
    let password =
        std::env::var("WIKIBOT_PASSWORD").context("WIKIBOT_PASSWORD environment variable not set")?;

    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&config.services.matrix.username, &password)
        .send()
        .await?;

    tracing::info!("Logged in as {}", config.services.matrix.username);

    let identity = BotIdentity {
        user_id: client
            .user_id()
            .context("No user id after login")?
            .to_string(),
        display_name: config.services.matrix.display_name.clone(),
    };

    // 4. Initialize Application Components
    let registry = Arc::new(CommandRegistry::new());
    let wiki = Arc::new(WikiClient::new(
        config.bot.search_url.clone(),
        config.bot.http_timeout_secs,
    ));
    let router = Arc::new(CommandRouter::new(
        config.clone(),
        registry,
        wiki,
        identity,
    ));

    // 5. Event Loop
    let start_time = std::time::SystemTime::now();
    let loop_router = router.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = loop_router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            // Notice is the Matrix convention for automated senders; it feeds
            // the filter's bot-author suppression rather than being dropped
            // here, together with the bot's own echoes.
            let (body, is_notice) = match &original_msg.content.msgtype {
                MessageType::Text(text_content) => (text_content.body.clone(), false),
                MessageType::Notice(notice_content) => (notice_content.body.clone(), true),
                _ => return,
            };

            let msg = InboundMessage {
                author_id: original_msg.sender.to_string(),
                is_author_bot: is_notice || original_msg.sender == room.own_user_id(),
                raw_text: body,
                room_id: room.room_id().as_str().to_string(),
            };

            let chat = MatrixService::new(room);
            if let Err(e) = router.route(&chat, &msg).await {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 6. Sync until shutdown
    let sync_client = client.clone();
    let sync_handle = tokio::spawn(async move { sync_client.sync(SyncSettings::default()).await });

    tokio::select! {
        res = sync_handle => {
            match res {
                Ok(Err(e)) => tracing::error!("Matrix sync failed: {}", e),
                Err(e) => tracing::error!("Matrix sync panic: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
        }
    }

    Ok(())
}
