//! Wire types for the Agri-Sahayak advisory API.
//!
//! Field names match the server's JSON exactly (`conversation_id`,
//! `last_updated`, `price_history`). Timestamps travel as RFC3339 strings and
//! are parsed with chrono only where a component needs to compare or format
//! them, mirroring how the server treats them as opaque instants.

use serde::{Deserialize, Serialize};

/// A titled, timestamped advisory thread for one user.
///
/// Identity is `conversation_id`. Only `title` is mutable from this layer
/// (via rename); everything else is server-owned.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Conversation {
    pub conversation_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Read-only profile data, fetched once per sidebar mount.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Envelope for `GET /users/{userId}`.
///
/// A missing `user` field deserializes to a default (empty) profile so the
/// badge can fall back to its placeholder instead of the fetch failing.
#[derive(Deserialize, Debug)]
pub struct ProfileResponse {
    #[serde(default)]
    pub user: UserProfile,
}

/// Envelope for `GET /users/{userId}/conversations`.
#[derive(Deserialize, Debug)]
pub struct ConversationsResponse {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Three-way severity bucket. Anything the server sends that we don't
/// recognize lands in `Low`, the default presentation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

/// A single weather alert. Ephemeral: each poll replaces the whole set, so
/// there is no client-side identity or merging.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherAlert {
    #[serde(default)]
    pub severity: AlertSeverity,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub district: String,
    pub timestamp: String,
}

/// Envelope for `GET /weather-alerts/{userId}`: the full alert set plus the
/// batch marker used as the per-user unread watermark.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WeatherAlertBatch {
    #[serde(default)]
    pub alerts: Vec<WeatherAlert>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// One point of the market price series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// Envelope for `GET /market-price-history/{userId}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PriceHistory {
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

/// Body for `PATCH /conversations/{id}`.
#[derive(Serialize, Debug)]
pub struct RenameRequest<'a> {
    pub title: &'a str,
}

/// Body for `POST /logout`.
#[derive(Serialize, Debug)]
pub struct LogoutRequest<'a> {
    pub user_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_deserializes_with_optional_fields() {
        let json = r#"{"conversation_id":"c1"}"#;
        let c: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(c.conversation_id, "c1");
        assert!(c.title.is_none());
        assert!(c.timestamp.is_none());
    }

    #[test]
    fn test_profile_response_defaults_missing_user() {
        let resp: ProfileResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.user.name.is_none());
        assert!(resp.user.email.is_none());
    }

    #[test]
    fn test_unknown_severity_falls_back_to_low() {
        let json = r#"{"severity":"catastrophic","timestamp":"2025-06-01T10:00:00Z"}"#;
        let alert: WeatherAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Low);
    }

    #[test]
    fn test_severity_parses_known_values() {
        for (raw, expected) in [
            ("high", AlertSeverity::High),
            ("medium", AlertSeverity::Medium),
            ("low", AlertSeverity::Low),
        ] {
            let json = format!(r#"{{"severity":"{raw}","timestamp":"t"}}"#);
            let alert: WeatherAlert = serde_json::from_str(&json).unwrap();
            assert_eq!(alert.severity, expected);
        }
    }

    #[test]
    fn test_missing_severity_defaults_to_low() {
        let json = r#"{"timestamp":"2025-06-01T10:00:00Z"}"#;
        let alert: WeatherAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Low);
    }

    #[test]
    fn test_alert_batch_defaults() {
        let batch: WeatherAlertBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.alerts.is_empty());
        assert!(batch.last_updated.is_none());
    }

    #[test]
    fn test_price_history_parses_full_payload() {
        let json = r#"{
            "crop": "wheat",
            "price_history": [
                {"date": "2025-06-01", "price": 2150.0},
                {"date": "2025-06-02", "price": 2175.5}
            ]
        }"#;
        let history: PriceHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.crop.as_deref(), Some("wheat"));
        assert_eq!(history.price_history.len(), 2);
        assert_eq!(history.price_history[1].price, 2175.5);
    }

    #[test]
    fn test_rename_request_serializes_title_only() {
        let req = RenameRequest { title: "Wheat advice" };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"title":"Wheat advice"}"#);
    }

    #[test]
    fn test_logout_request_serializes_user_id() {
        let req = LogoutRequest { user_id: "u1" };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"user_id":"u1"}"#);
    }
}
