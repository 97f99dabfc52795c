//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

/// A message as delivered by the gateway, reduced to what dispatch needs.
/// Created per event, read-only, discarded once dispatch completes.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author_id: String,
    pub is_author_bot: bool,
    pub raw_text: String,
    pub room_id: String,
}

/// Why an inbound message produced no command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    NoPrefixOrMention,
    AuthorIsBot,
    UnknownCommand,
}

/// Outcome of running an eligible message through the dispatch core.
/// Each message yields at most one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Invoked { command: String, args: String },
    Ignored(IgnoreReason),
}

/// Result of resolving a search term against the wiki.
/// Exactly one variant per invocation; not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Canonical article link for the term.
    Found(String),
    /// The search landed on a results page; carries the original term.
    NotFound(String),
    /// Network, status, or page-shape failure. No retry is attempted.
    FetchError(String),
}

/// A rich outbound message (title, body, accent color).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub color: CardColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardColor {
    Red,
}

impl CardColor {
    pub fn as_hex(&self) -> &'static str {
        match self {
            CardColor::Red => "#d32f2f",
        }
    }
}
