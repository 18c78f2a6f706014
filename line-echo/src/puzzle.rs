//! Puzzle progress notifications.
//!
//! The client reports that a puzzle was solved or skipped and gets back a
//! confirmation line to display. Both request fields arrive as JSON strings
//! (`{"puzzle_id": "42", "is_solved": "true"}`).

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Puzzle notification request.
///
/// Missing or `null` fields take their zero value (`0`, `false`); other
/// values must be strings holding the encoded value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PuzzleRequest {
    #[serde(default, deserialize_with = "from_json_string")]
    pub puzzle_id: i64,
    #[serde(default, deserialize_with = "from_json_string")]
    pub is_solved: bool,
}

/// Puzzle notification response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleResponse {
    pub message: String,
}

/// Confirmation line for a solved or skipped puzzle.
pub fn solve(puzzle_id: i64, is_solved: bool) -> String {
    if is_solved {
        format!("{puzzle_id}に正解しました")
    } else {
        format!("{puzzle_id}をスキップしました")
    }
}

/// Decode a request body and build the response.
pub fn handle(body: &[u8]) -> Result<PuzzleResponse, serde_json::Error> {
    let request: PuzzleRequest = serde_json::from_slice(body)?;
    Ok(PuzzleResponse {
        message: solve(request.puzzle_id, request.is_solved),
    })
}

/// Deserialize a value carried inside a JSON string. `null` leaves the
/// zero value in place.
fn from_json_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw.parse().map_err(de::Error::custom),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_solved() {
        let message = solve(42, true);
        assert!(message.contains("42"));
        assert!(message.ends_with("に正解しました"));
    }

    #[test]
    fn test_solve_skipped() {
        let message = solve(42, false);
        assert!(message.contains("42"));
        assert!(message.ends_with("をスキップしました"));
    }

    #[test]
    fn test_solve_arbitrary_ids() {
        for id in [0, 1, 7, 1_000, i64::MAX] {
            assert_eq!(solve(id, true), format!("{id}に正解しました"));
            assert_eq!(solve(id, false), format!("{id}をスキップしました"));
        }
    }

    #[test]
    fn test_handle_string_encoded_fields() {
        let response = handle(br#"{"puzzle_id":"3","is_solved":"true"}"#).unwrap();
        assert_eq!(response.message, "3に正解しました");

        let response = handle(br#"{"puzzle_id":"3","is_solved":"false","extra":1}"#).unwrap();
        assert_eq!(response.message, "3をスキップしました");
    }

    #[test]
    fn test_handle_missing_fields_default() {
        let response = handle(b"{}").unwrap();
        assert_eq!(response.message, "0をスキップしました");
    }

    #[test]
    fn test_handle_null_fields_default() {
        let response = handle(br#"{"puzzle_id":null,"is_solved":null}"#).unwrap();
        assert_eq!(response.message, "0をスキップしました");

        let response = handle(br#"{"puzzle_id":"8","is_solved":null}"#).unwrap();
        assert_eq!(response.message, "8をスキップしました");

        let response = handle(br#"{"puzzle_id":null,"is_solved":"true"}"#).unwrap();
        assert_eq!(response.message, "0に正解しました");
    }

    #[test]
    fn test_handle_rejects_unencoded_values() {
        assert!(handle(br#"{"puzzle_id":3,"is_solved":"true"}"#).is_err());
        assert!(handle(br#"{"puzzle_id":"3","is_solved":true}"#).is_err());
    }

    #[test]
    fn test_handle_rejects_malformed() {
        assert!(handle(br#"{"puzzle_id":"abc","is_solved":"true"}"#).is_err());
        assert!(handle(br#"{"puzzle_id":"3","is_solved":"yes"}"#).is_err());
        assert!(handle(b"").is_err());
        assert!(handle(b"not json").is_err());
    }

    #[test]
    fn test_response_serialization() {
        let json = serde_json::to_string(&PuzzleResponse {
            message: solve(5, true),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"5に正解しました"}"#);
    }
}
