//! # Usage Command
//!
//! Handles `!usage`: replies to the invoking user with how to use the bot.

use anyhow::Result;

use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub async fn handle_usage(chat: &impl ChatProvider, sender: &str, trigger: char) -> Result<()> {
    chat.send_message(&messages::usage(sender, trigger))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
