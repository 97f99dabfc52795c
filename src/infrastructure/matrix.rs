//! # Matrix Service Adapter
//!
//! Implements the `ChatProvider` trait for the Matrix protocol using the
//! `matrix_sdk`. Acts as the bridge between the generic `ChatProvider`
//! interface used by the bot's core logic and the Matrix SDK specifics.

use crate::domain::traits::ChatProvider;
use crate::domain::types::Card;
use async_trait::async_trait;
use matrix_sdk::room::Room;
use matrix_sdk::ruma::events::room::message::RoomMessageEventContent;

#[derive(Clone)]
pub struct MatrixService {
    room: Room,
}

impl MatrixService {
    pub fn new(room: Room) -> Self {
        Self { room }
    }
}

#[async_trait]
impl ChatProvider for MatrixService {
    fn room_id(&self) -> String {
        self.room.room_id().as_str().to_string()
    }

    async fn send_message(&self, content: &str) -> Result<(), String> {
        tracing::info!("Bot sending message to {}: {}", self.room_id(), content);
        self.room
            .send(RoomMessageEventContent::text_markdown(content))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn send_card(&self, card: &Card) -> Result<(), String> {
        tracing::info!("Bot sending card to {}: {}", self.room_id(), card.title);
        let plain = format!("{}\n{}", card.title, card.description);
        let html = format!(
            "<blockquote><strong><font color=\"{}\">{}</font></strong><br/>{}</blockquote>",
            card.color.as_hex(),
            escape_html(&card.title),
            escape_html(&card.description),
        );
        self.room
            .send(RoomMessageEventContent::text_html(plain, html))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Minimal escaping for text interpolated into the card HTML. Card text can
/// embed the user's raw search term.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
