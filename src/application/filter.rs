//! # Message Filter
//!
//! Decides whether an inbound message is eligible to be treated as a command
//! invocation. Pure classification, no side effects.

use crate::domain::types::{IgnoreReason, InboundMessage};

/// The bot's own identity, used for mention-prefix detection.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// Result of filtering an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The message should be dispatched. `arg_pos` is the byte offset
    /// immediately following the matched trigger or mention token.
    Eligible { arg_pos: usize },
    Ignored(IgnoreReason),
}

/// Classify a message as a potential command invocation.
///
/// Eligible requires the text to start with `trigger` at position 0, or to
/// begin with a mention of the bot (user id or display name, optionally
/// followed by `:`), and the author must not be a bot.
pub fn filter(msg: &InboundMessage, trigger: char, identity: &BotIdentity) -> Eligibility {
    if msg.is_author_bot {
        return Eligibility::Ignored(IgnoreReason::AuthorIsBot);
    }

    if msg.raw_text.starts_with(trigger) {
        return Eligibility::Eligible {
            arg_pos: trigger.len_utf8(),
        };
    }

    if let Some(arg_pos) = mention_prefix_len(&msg.raw_text, identity) {
        return Eligibility::Eligible { arg_pos };
    }

    Eligibility::Ignored(IgnoreReason::NoPrefixOrMention)
}

/// Length of a leading mention of the bot, if present.
fn mention_prefix_len(text: &str, identity: &BotIdentity) -> Option<usize> {
    let mut tokens = vec![identity.user_id.as_str()];
    if let Some(name) = identity.display_name.as_deref() {
        tokens.push(name);
    }

    for token in tokens {
        if token.is_empty() || !text.starts_with(token) {
            continue;
        }
        let mut pos = token.len();
        if text[pos..].starts_with(':') {
            pos += 1;
        }
        return Some(pos);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> BotIdentity {
        BotIdentity {
            user_id: "@wikibot:example.org".to_string(),
            display_name: Some("WikiBot".to_string()),
        }
    }

    fn msg(text: &str, is_bot: bool) -> InboundMessage {
        InboundMessage {
            author_id: "@alice:example.org".to_string(),
            is_author_bot: is_bot,
            raw_text: text.to_string(),
            room_id: "!room:example.org".to_string(),
        }
    }

    #[test]
    fn test_bot_author_always_ignored() {
        // Even with a valid prefix, bot authors never trigger dispatch.
        let result = filter(&msg("!wiki Rust", true), '!', &identity());
        assert_eq!(result, Eligibility::Ignored(IgnoreReason::AuthorIsBot));
    }

    #[test]
    fn test_plain_chatter_ignored() {
        let result = filter(&msg("hello everyone", false), '!', &identity());
        assert_eq!(
            result,
            Eligibility::Ignored(IgnoreReason::NoPrefixOrMention)
        );
    }

    #[test]
    fn test_trigger_prefix_eligible() {
        let result = filter(&msg("!wiki Rust", false), '!', &identity());
        assert_eq!(result, Eligibility::Eligible { arg_pos: 1 });
    }

    #[test]
    fn test_trigger_must_be_at_position_zero() {
        let result = filter(&msg(" !wiki Rust", false), '!', &identity());
        assert_eq!(
            result,
            Eligibility::Ignored(IgnoreReason::NoPrefixOrMention)
        );
    }

    #[test]
    fn test_user_id_mention_eligible() {
        let text = "@wikibot:example.org: wiki Rust";
        let result = filter(&msg(text, false), '!', &identity());
        // arg_pos sits right after the id and the optional colon.
        assert_eq!(
            result,
            Eligibility::Eligible {
                arg_pos: "@wikibot:example.org:".len()
            }
        );
    }

    #[test]
    fn test_display_name_mention_eligible() {
        let result = filter(&msg("WikiBot wiki Rust", false), '!', &identity());
        assert_eq!(
            result,
            Eligibility::Eligible {
                arg_pos: "WikiBot".len()
            }
        );
    }
}
