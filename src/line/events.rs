// =============================================================================
// Webhook payload types
// =============================================================================
//
// Only text messages matter to the bot; every other event or message kind
// deserialises into an `Other` variant and is skipped.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: String,
        message: Message,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl Event {
    /// `(reply_token, text)` for a text-message event.
    pub fn text_query(&self) -> Option<(&str, &str)> {
        match self {
            Self::Message {
                reply_token,
                message: Message::Text { text },
            } if !reply_token.is_empty() => Some((reply_token.as_str(), text.as_str())),
            _ => None,
        }
    }
}
