//! # Messages
//!
//! Constant strings and format functions for user-facing messages.

use crate::domain::types::{Card, CardColor};

pub fn found(term: &str, link: &str) -> String {
    format!("Found \"{term}\": {link}")
}

pub fn not_found_card(term: &str) -> Card {
    Card {
        title: "Error!".to_string(),
        description: format!("Wiki page not found for \"{term}\"!"),
        color: CardColor::Red,
    }
}

pub fn lookup_failed_card() -> Card {
    Card {
        title: "Error!".to_string(),
        description: "Wiki lookup failed. Please try again later.".to_string(),
        color: CardColor::Red,
    }
}

pub fn command_failed_card() -> Card {
    Card {
        title: "Error!".to_string(),
        description: "Something went wrong handling that command.".to_string(),
        color: CardColor::Red,
    }
}

pub fn wiki_usage(trigger: char) -> String {
    format!("Usage: `{trigger}wiki <search term>`")
}

pub fn usage(sender: &str, trigger: char) -> String {
    format!("{sender}: To use WikiBot type: `{trigger}wiki <search term>`")
}
