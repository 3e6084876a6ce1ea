//! Contract with the remote game service.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::state::{Destination, GameState, PlayerState};

/// Body of every action reply (start, choose role, fly, eat, fight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActionResponse {
    #[serde(default)]
    pub state: Option<GameState>,
    #[serde(default)]
    pub player: Option<PlayerState>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The service reports some failures under a capitalized key.
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error_capitalized: Option<String>,
    /// Fight outcome, only set by the fight endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,
}

impl ActionResponse {
    /// The reported error under either casing.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        let present = |msg: &&str| !msg.is_empty();
        self.error
            .as_deref()
            .filter(present)
            .or_else(|| self.error_capitalized.as_deref().filter(present))
    }

    #[must_use]
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyRequest {
    pub icao: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected { status: u16, message: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Error text reported by the service, if it sent any.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Turn a raw HTTP reply into an action response.
///
/// # Errors
///
/// Non-success statuses become [`ApiError::Rejected`] carrying the body's
/// error field when there is one; undecodable success bodies become
/// [`ApiError::Decode`].
pub fn interpret_reply(ok: bool, status: u16, body: &str) -> Result<ActionResponse, ApiError> {
    if !ok {
        let message = serde_json::from_str::<ActionResponse>(body)
            .ok()
            .and_then(|reply| reply.error_message().map(str::to_string));
        return Err(ApiError::Rejected { status, message });
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Decode the destination list.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for non-success statuses and
/// [`ApiError::Decode`] when the body is not a destination array.
pub fn interpret_destinations(
    ok: bool,
    status: u16,
    body: &str,
) -> Result<Vec<Destination>, ApiError> {
    if !ok {
        return interpret_reply(false, status, body).map(|_| Vec::new());
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Remote game service.
///
/// Futures are not `Send`: the client runs on a single-threaded executor.
#[async_trait(?Send)]
pub trait GameApi {
    /// `POST /start`
    async fn start_game(&self) -> Result<ActionResponse, ApiError>;

    /// `POST /choose_role` with a role name in the service vocabulary.
    async fn choose_role(&self, role: &str) -> Result<ActionResponse, ApiError>;

    /// `GET /countries`
    async fn destinations(&self) -> Result<Vec<Destination>, ApiError>;

    /// `POST /fly`
    async fn fly(&self, icao: &str) -> Result<ActionResponse, ApiError>;

    /// `POST /eat`
    async fn eat(&self) -> Result<ActionResponse, ApiError>;

    /// `POST /fight`
    async fn fight(&self) -> Result<ActionResponse, ApiError>;
}

#[async_trait(?Send)]
impl<T: GameApi + ?Sized> GameApi for Rc<T> {
    async fn start_game(&self) -> Result<ActionResponse, ApiError> {
        (**self).start_game().await
    }

    async fn choose_role(&self, role: &str) -> Result<ActionResponse, ApiError> {
        (**self).choose_role(role).await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ApiError> {
        (**self).destinations().await
    }

    async fn fly(&self, icao: &str) -> Result<ActionResponse, ApiError> {
        (**self).fly(icao).await
    }

    async fn eat(&self) -> Result<ActionResponse, ApiError> {
        (**self).eat().await
    }

    async fn fight(&self) -> Result<ActionResponse, ApiError> {
        (**self).fight().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_read_under_either_casing() {
        let lower: ActionResponse = serde_json::from_str(r#"{"error": "no food"}"#).unwrap();
        assert_eq!(lower.error_message(), Some("no food"));

        let upper: ActionResponse = serde_json::from_str(r#"{"Error": "Flying failed"}"#).unwrap();
        assert_eq!(upper.error_message(), Some("Flying failed"));

        let none: ActionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(none.error_message(), None);
    }

    #[test]
    fn blank_lowercase_error_does_not_hide_the_other_casing() {
        let reply: ActionResponse =
            serde_json::from_str(r#"{"error": "", "Error": "Flying failed"}"#).unwrap();
        assert_eq!(reply.error_message(), Some("Flying failed"));

        let blank: ActionResponse = serde_json::from_str(r#"{"error": "", "Error": ""}"#).unwrap();
        assert_eq!(blank.error_message(), None);
    }

    #[test]
    fn null_player_from_start_is_accepted() {
        let reply = interpret_reply(
            true,
            200,
            r#"{"state": {"location": {"name": "Helsinki", "iso_country": "FI"}, "time_left": 168, "range_km": 400, "parts": []}, "player": null}"#,
        )
        .unwrap();
        assert!(reply.state.is_some());
        assert!(reply.player.is_none());
        assert!(reply.messages.is_empty());
    }

    #[test]
    fn rejected_reply_carries_service_message() {
        let err = interpret_reply(false, 400, r#"{"error": "Tuntematon rooli"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: Some("Tuntematon rooli".to_string())
            }
        );
        assert_eq!(err.to_string(), "Tuntematon rooli");
    }

    #[test]
    fn rejected_reply_without_body_has_no_message() {
        let err = interpret_reply(false, 500, "<html>oops</html>").unwrap_err();
        assert_eq!(err.service_message(), None);
        assert_eq!(err.to_string(), "request rejected");
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = interpret_reply(true, 200, "[1, 2").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn destinations_decode_from_array() {
        let list = interpret_destinations(
            true,
            200,
            r#"[{"country": "Estonia", "icao": "EETN", "iso": "EE", "distance": 101.2}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].icao, "EETN");

        let err = interpret_destinations(false, 400, r#"{"Error": "No game running"}"#).unwrap_err();
        assert_eq!(err.service_message(), Some("No game running"));
    }
}
