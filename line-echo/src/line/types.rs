//! Messaging API wire types.
//!
//! Inbound: the webhook body LINE posts to the callback endpoint.
//! Outbound: the reply request sent back to the Messaging API.
//!
//! Decoding is forward compatible: unknown fields are ignored and unknown
//! event or message kinds land in an `Unsupported` variant instead of failing.

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound Webhook Types
// =============================================================================

/// Webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    /// User ID of the bot that should receive the events
    #[serde(default)]
    pub destination: String,
    /// Events in delivery order; empty for the console's verification request
    pub events: Vec<Event>,
}

/// One webhook event, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A user sent a message
    Message(MessageEvent),
    /// Follow, unfollow, postback, beacon and every other event kind
    #[serde(other)]
    Unsupported,
}

/// Payload of a `message` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// Single-use token for replying to this event; absent in standby mode
    #[serde(default)]
    pub reply_token: Option<String>,
    /// Event time in milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    pub message: Message,
}

/// Message content, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    Text(TextMessage),
    /// Image, video, audio, file, location and sticker messages
    #[serde(other)]
    Unsupported,
}

/// A text message.
#[derive(Debug, Clone, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub id: String,
    pub text: String,
}

impl Event {
    /// Reply token and text of a text message event, `None` for anything else
    /// including text messages that cannot be replied to.
    pub fn text(&self) -> Option<(&str, &str)> {
        match self {
            Event::Message(MessageEvent {
                reply_token: Some(reply_token),
                message: Message::Text(TextMessage { text, .. }),
                ..
            }) => Some((reply_token.as_str(), text.as_str())),
            Event::Message(_) | Event::Unsupported => None,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(MessageEvent {
                reply_token: None,
                ..
            }) => "message.no_reply_token",
            Event::Message(MessageEvent {
                message: Message::Text(_),
                ..
            }) => "message.text",
            Event::Message(_) => "message.other",
            Event::Unsupported => "other",
        }
    }
}

// =============================================================================
// Outbound Reply Types
// =============================================================================

/// A message object in a reply request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReplyMessage {
    Text { text: String },
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyMessage::Text { text: text.into() }
    }
}

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest<'a> {
    pub reply_token: &'a str,
    pub messages: &'a [ReplyMessage],
}

/// Error body returned by the Messaging API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_message_event() {
        let body = r#"{
            "destination": "Uxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            "events": [{
                "type": "message",
                "mode": "active",
                "timestamp": 1462629479859,
                "source": {"type": "user", "userId": "U4af4980629"},
                "webhookEventId": "01FZ74A0TDDPYRVKNK77XKC3ZR",
                "deliveryContext": {"isRedelivery": false},
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "message": {
                    "id": "444573844083572737",
                    "type": "text",
                    "quoteToken": "q3Plxr4AgKd",
                    "text": "Hello, world"
                }
            }]
        }"#;

        let request: WebhookRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.destination, "Uxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx");
        assert_eq!(request.events.len(), 1);
        assert_eq!(
            request.events[0].text(),
            Some(("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA", "Hello, world"))
        );
        assert_eq!(request.events[0].kind(), "message.text");
    }

    #[test]
    fn test_decode_unsupported_event_kinds() {
        let body = r#"{
            "destination": "U1",
            "events": [
                {"type": "follow", "replyToken": "t1", "timestamp": 1},
                {"type": "message", "replyToken": "t2", "message": {"id": "1", "type": "sticker", "packageId": "446", "stickerId": "1988"}},
                {"type": "unsend", "unsend": {"messageId": "325708"}}
            ]
        }"#;

        let request: WebhookRequest = serde_json::from_str(body).unwrap();

        assert!(matches!(request.events[0], Event::Unsupported));
        assert!(matches!(
            request.events[1],
            Event::Message(MessageEvent {
                message: Message::Unsupported,
                ..
            })
        ));
        assert!(matches!(request.events[2], Event::Unsupported));
        assert!(request.events.iter().all(|e| e.text().is_none()));
        assert_eq!(request.events[1].kind(), "message.other");
    }

    #[test]
    fn test_decode_standby_message_without_reply_token() {
        let body = r#"{
            "destination": "U1",
            "events": [{
                "type": "message",
                "mode": "standby",
                "timestamp": 1462629479859,
                "source": {"type": "user", "userId": "U4af4980629"},
                "message": {"id": "1", "type": "text", "text": "hi"}
            }]
        }"#;

        let request: WebhookRequest = serde_json::from_str(body).unwrap();

        assert!(matches!(
            request.events[0],
            Event::Message(MessageEvent {
                reply_token: None,
                message: Message::Text(_),
                ..
            })
        ));
        assert_eq!(request.events[0].text(), None);
        assert_eq!(request.events[0].kind(), "message.no_reply_token");
    }

    #[test]
    fn test_decode_empty_verification_request() {
        let request: WebhookRequest =
            serde_json::from_str(r#"{"destination":"U1","events":[]}"#).unwrap();
        assert!(request.events.is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(serde_json::from_str::<WebhookRequest>("not json").is_err());
        assert!(serde_json::from_str::<WebhookRequest>(r#"{"destination":"U1"}"#).is_err());
        assert!(serde_json::from_str::<WebhookRequest>(
            r#"{"events":[{"type":"message","replyToken":"t1"}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_reply_request_serialization() {
        let messages = [ReplyMessage::text("Hello, world")];
        let request = ReplyRequest {
            reply_token: "token123",
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "replyToken": "token123",
                "messages": [{"type": "text", "text": "Hello, world"}]
            })
        );
    }
}
