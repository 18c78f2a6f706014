//! LINE Messaging API integration.
//!
//! - `types`: webhook payloads and reply request bodies
//! - `client`: outbound reply client

pub mod client;
pub mod types;

pub use client::{LineClient, Replier, ReplyError};
pub use types::{Event, Message, MessageEvent, ReplyMessage, TextMessage, WebhookRequest};
