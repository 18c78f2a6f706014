//! LINE echo bot - webhook endpoint for the LINE Messaging API.
//!
//! The service verifies each webhook against the channel secret and echoes
//! every text message back to its sender. It also answers a small,
//! unauthenticated puzzle progress endpoint.
//!
//! ## Request flow
//!
//! ```text
//! LINE → /callback → verify signature → decode events → reply API (one per event)
//! ```

pub mod config;
pub mod line;
pub mod puzzle;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use line::{LineClient, Replier, ReplyError};
pub use web::{router, AppState, CallbackError};
