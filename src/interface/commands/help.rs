//! # Help Command
//!
//! Handles `!help`: lists registered commands with their summaries, built
//! from the registry metadata.

use anyhow::Result;

use crate::application::registry::CommandRegistry;
use crate::domain::traits::ChatProvider;

pub async fn handle_help(
    registry: &CommandRegistry,
    trigger: char,
    chat: &impl ChatProvider,
) -> Result<()> {
    let mut response = String::from("**WikiBot commands**\n");
    for command in registry.iter() {
        let params: String = command
            .params
            .iter()
            .map(|p| format!(" <{}>", p.name))
            .collect();
        response.push_str(&format!(
            "* `{}{}{}`: {}\n",
            trigger, command.name, params, command.summary
        ));
    }
    chat.send_message(&response)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Card;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChat {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingChat {
        async fn send_message(&self, content: &str) -> Result<(), String> {
            self.sent.lock().unwrap().push(content.to_string());
            Ok(())
        }

        async fn send_card(&self, card: &Card) -> Result<(), String> {
            self.sent.lock().unwrap().push(card.title.clone());
            Ok(())
        }

        fn room_id(&self) -> String {
            "!room:example.org".to_string()
        }
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let registry = CommandRegistry::new();
        let chat = RecordingChat::default();
        handle_help(&registry, '!', &chat).await.unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("`!wiki <term>`"));
        assert!(sent[0].contains("`!usage`"));
        assert!(sent[0].contains("`!help`"));
    }
}
