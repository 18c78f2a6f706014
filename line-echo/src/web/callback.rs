//! LINE webhook callback.
//!
//! One request is handled strictly in order:
//! 1. Verify `X-Line-Signature` against the raw body
//! 2. Decode the event batch
//! 3. Echo each text message back through its reply token
//!
//! The first failure ends the request. Replies already sent stay sent.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::line::{Event, Replier, ReplyError, ReplyMessage, WebhookRequest};
use crate::web::handlers::AppState;
use crate::web::signature::{signature_from_headers, verify_signature};

/// Why a callback was rejected.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("unsupported event at index {index} ({kind})")]
    UnsupportedEvent { index: usize, kind: &'static str },

    #[error("reply failed for event at index {index}: {source}")]
    Reply {
        index: usize,
        #[source]
        source: ReplyError,
    },
}

/// `{"message": ...}` error body.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self {
            CallbackError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    message: "invalid signature",
                }),
            )
                .into_response(),
            CallbackError::Decode(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
            CallbackError::UnsupportedEvent { .. } | CallbackError::Reply { .. } => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    message: "Bad Request",
                }),
            )
                .into_response(),
        }
    }
}

/// Authenticate, decode and dispatch one webhook request.
///
/// Returns the number of events replied to. Nothing is decoded or sent
/// unless the signature checks out.
pub async fn process_callback<R: Replier>(
    channel_secret: &[u8],
    replier: &R,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<usize, CallbackError> {
    let Some(signature) = signature_from_headers(headers) else {
        warn!(body_length = body.len(), "callback_signature_missing");
        return Err(CallbackError::InvalidSignature);
    };

    if !verify_signature(channel_secret, signature, body) {
        warn!(body_length = body.len(), "callback_signature_invalid");
        return Err(CallbackError::InvalidSignature);
    }

    let request: WebhookRequest = serde_json::from_slice(body).map_err(|e| {
        error!(error = %e, body_length = body.len(), "callback_decode_failed");
        CallbackError::Decode(e)
    })?;

    info!(
        destination = %request.destination,
        event_count = request.events.len(),
        "callback_events_decoded"
    );

    dispatch_events(replier, &request.events).await
}

/// Echo every text message in `events`, stopping at the first event that is
/// not a text message or whose reply fails.
pub async fn dispatch_events<R: Replier>(
    replier: &R,
    events: &[Event],
) -> Result<usize, CallbackError> {
    for (index, event) in events.iter().enumerate() {
        let Some((reply_token, text)) = event.text() else {
            warn!(index, kind = event.kind(), "callback_unsupported_event");
            return Err(CallbackError::UnsupportedEvent {
                index,
                kind: event.kind(),
            });
        };

        replier
            .reply(reply_token, &[ReplyMessage::text(text)])
            .await
            .map_err(|source| {
                error!(index, error = %source, "callback_reply_failed");
                CallbackError::Reply { index, source }
            })?;
    }

    Ok(events.len())
}

/// Webhook endpoint.
///
/// Takes the body as raw bytes so the signature is checked against exactly
/// what LINE sent.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, CallbackError> {
    let replied = process_callback(&state.channel_secret, &state.line, &headers, &body).await?;

    info!(replied, "callback_processed");

    Ok(StatusCode::OK)
}
