//! # Domain Traits
//!
//! Abstract interfaces for core system components.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::types::Card;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a plain message to the room
    async fn send_message(&self, content: &str) -> Result<(), String>;

    /// Send a rich card to the room
    async fn send_card(&self, card: &Card) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}
