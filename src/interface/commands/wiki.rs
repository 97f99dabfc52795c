//! # Wiki Command
//!
//! Handles `!wiki <term>`: resolves the term against Wikipedia and emits a
//! link, a not-found card, or a failure card.

use anyhow::Result;

use crate::domain::traits::ChatProvider;
use crate::domain::types::SearchOutcome;
use crate::infrastructure::wiki::WikiClient;
use crate::strings::messages;

pub async fn handle_wiki(
    wiki: &WikiClient,
    chat: &impl ChatProvider,
    term: &str,
    trigger: char,
) -> Result<()> {
    let term = term.trim();
    if term.is_empty() {
        return chat
            .send_message(&messages::wiki_usage(trigger))
            .await
            .map_err(|e| anyhow::anyhow!(e));
    }

    match wiki.resolve(term).await {
        SearchOutcome::Found(link) => chat
            .send_message(&messages::found(term, &link))
            .await
            .map_err(|e| anyhow::anyhow!(e)),
        SearchOutcome::NotFound(term) => chat
            .send_card(&messages::not_found_card(&term))
            .await
            .map_err(|e| anyhow::anyhow!(e)),
        SearchOutcome::FetchError(cause) => {
            tracing::warn!("Wiki lookup for '{}' failed: {}", term, cause);
            chat.send_card(&messages::lookup_failed_card())
                .await
                .map_err(|e| anyhow::anyhow!(e))
        }
    }
}
