//! # Command Router
//!
//! The dispatch core. `dispatch` turns eligible message text into a
//! `DispatchResult`; `CommandRouter::route` runs the full pipeline
//! (filter, dispatch, handler invocation) for one inbound message.
//!
//! Silent outcomes are a product contract, not an error: messages without a
//! trigger, messages from bots, and unknown commands all produce no reply.

use anyhow::Result;
use std::sync::Arc;

use crate::application::filter::{BotIdentity, Eligibility, filter};
use crate::application::registry::CommandRegistry;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{DispatchResult, IgnoreReason, InboundMessage};
use crate::infrastructure::wiki::WikiClient;
use crate::interface::commands;
use crate::strings::messages;

/// Resolve eligible message text to a command invocation.
///
/// Takes the text from `arg_pos` onward, splits off the command name at the
/// first whitespace run, and binds the rest to the command's declared
/// remainder parameter (one separating space dropped, interior verbatim).
pub fn dispatch(text: &str, arg_pos: usize, registry: &CommandRegistry) -> DispatchResult {
    let remainder = text[arg_pos..].trim_start();

    let (name, rest) = match remainder.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (remainder, ""),
    };

    let Some(command) = registry.get(name) else {
        return DispatchResult::Ignored(IgnoreReason::UnknownCommand);
    };

    let args = if command.params.iter().any(|p| p.is_remainder) {
        rest.to_string()
    } else {
        String::new()
    };

    DispatchResult::Invoked {
        command: command.name.to_string(),
        args,
    }
}

pub struct CommandRouter {
    config: AppConfig,
    registry: Arc<CommandRegistry>,
    wiki: Arc<WikiClient>,
    identity: BotIdentity,
}

impl CommandRouter {
    pub fn new(
        config: AppConfig,
        registry: Arc<CommandRegistry>,
        wiki: Arc<WikiClient>,
        identity: BotIdentity,
    ) -> Self {
        Self {
            config,
            registry,
            wiki,
            identity,
        }
    }

    /// Run one inbound message through filter and dispatch, invoking the
    /// matched handler. Handler faults are caught here and surfaced to the
    /// room as a failure card; they never propagate to the gateway loop.
    pub async fn route<C>(&self, chat: &C, msg: &InboundMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        let arg_pos = match filter(msg, self.config.bot.trigger, &self.identity) {
            Eligibility::Eligible { arg_pos } => arg_pos,
            Eligibility::Ignored(reason) => {
                tracing::debug!("Ignoring message from {}: {:?}", msg.author_id, reason);
                return Ok(());
            }
        };

        let (command, args) = match dispatch(&msg.raw_text, arg_pos, &self.registry) {
            DispatchResult::Invoked { command, args } => (command, args),
            DispatchResult::Ignored(reason) => {
                tracing::debug!("Ignoring message from {}: {:?}", msg.author_id, reason);
                return Ok(());
            }
        };
        tracing::info!(
            "Dispatching cmd='{}' args='{}' sender='{}' room='{}'",
            command,
            args,
            msg.author_id,
            msg.room_id
        );

        let handled = match command.as_str() {
            "wiki" => {
                commands::wiki::handle_wiki(&self.wiki, chat, &args, self.config.bot.trigger).await
            }
            "usage" => {
                commands::usage::handle_usage(chat, &msg.author_id, self.config.bot.trigger).await
            }
            "help" => {
                commands::help::handle_help(&self.registry, self.config.bot.trigger, chat).await
            }
            // The registry and this match are kept in lockstep; a command in
            // one but not the other is a programming error.
            other => Err(anyhow::anyhow!("no handler bound for command '{other}'")),
        };

        if let Err(e) = handled {
            tracing::error!("Command '{}' failed: {:#}", command, e);
            let _ = chat.send_card(&messages::command_failed_card()).await;
        }

        Ok(())
    }
}
