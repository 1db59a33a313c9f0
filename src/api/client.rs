//! HTTP client for the advisory backend.
//!
//! All seven endpoints the presentation layer consumes live here, behind the
//! `AdvisoryApi` trait so the TUI and tests can swap in doubles. The client is
//! deliberately thin: no retries, no backoff, no caching. Every failure is
//! terminal for the action that triggered it; recovery policy belongs to the
//! calling component.

use async_trait::async_trait;
use log::{debug, warn};

use super::types::{
    Conversation, ConversationsResponse, LogoutRequest, PriceHistory, ProfileResponse,
    RenameRequest, UserProfile, WeatherAlertBatch,
};

/// Default origin of the advisory backend.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Errors surfaced by API calls.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body read).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "network error: {e}"),
            ApiError::Api { status, message } => write!(f, "API error {status}: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The remote collaborator as the components see it.
///
/// One method per endpoint, shapes per the wire types. Implemented by
/// [`HttpAdvisoryApi`] in production and by `NoopApi` in `test_support`.
#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, ApiError>;
    async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError>;
    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError>;
    async fn rename_conversation(&self, conversation_id: &str, title: &str)
    -> Result<(), ApiError>;
    async fn logout(&self, user_id: &str) -> Result<(), ApiError>;
    async fn fetch_weather_alerts(&self, user_id: &str) -> Result<WeatherAlertBatch, ApiError>;
    async fn fetch_price_history(&self, user_id: &str) -> Result<PriceHistory, ApiError>;
}

/// reqwest-backed implementation against a fixed origin.
pub struct HttpAdvisoryApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAdvisoryApi {
    /// Creates a client for the given origin (`None` uses the default local
    /// backend).
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Turns a non-success response into `ApiError::Api`, keeping the body as
    /// the message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        debug!("response status: {}", response.status());
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("advisory API error: {} - {}", status, message);
            return Err(ApiError::Api { status, message });
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: String) -> Result<T, ApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait]
impl AdvisoryApi for HttpAdvisoryApi {
    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let resp: ProfileResponse = self.get_json(format!("/users/{user_id}")).await?;
        Ok(resp.user)
    }

    async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError> {
        let resp: ConversationsResponse = self
            .get_json(format!("/users/{user_id}/conversations"))
            .await?;
        debug!("listed {} conversations for {}", resp.conversations.len(), user_id);
        Ok(resp.conversations)
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/conversations/{conversation_id}", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(format!("{}/conversations/{conversation_id}", self.base_url))
            .json(&RenameRequest { title })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn logout(&self, user_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .json(&LogoutRequest { user_id })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_weather_alerts(&self, user_id: &str) -> Result<WeatherAlertBatch, ApiError> {
        self.get_json(format!("/weather-alerts/{user_id}")).await
    }

    async fn fetch_price_history(&self, user_id: &str) -> Result<PriceHistory, ApiError> {
        self.get_json(format!("/market-price-history/{user_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let api = HttpAdvisoryApi::new(None);
        assert_eq!(api.base_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_custom_base_url() {
        let api = HttpAdvisoryApi::new(Some("http://example.com:9000".to_string()));
        assert_eq!(api.base_url, "http://example.com:9000");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: not found");

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
