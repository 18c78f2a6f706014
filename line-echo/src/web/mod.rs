//! Web server module.
//!
//! - `POST /callback`: LINE webhook, signature checked, text messages echoed
//! - `POST /puzzle`: puzzle solved/skipped confirmation
//! - `GET /health`: liveness probe

pub mod callback;
pub mod handlers;
pub mod signature;

pub use callback::{callback, dispatch_events, process_callback, CallbackError};
pub use handlers::{health, puzzle_notification, router, AppState, HealthResponse};
pub use signature::{sign, signature_from_headers, verify_signature, SIGNATURE_HEADER};
