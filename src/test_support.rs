//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{
    AdvisoryApi, AlertSeverity, ApiError, Conversation, PriceHistory, UserProfile, WeatherAlert,
    WeatherAlertBatch,
};

/// An API double that answers every call with empty data.
pub struct NoopApi;

#[async_trait]
impl AdvisoryApi for NoopApi {
    async fn fetch_profile(&self, _user_id: &str) -> Result<UserProfile, ApiError> {
        Ok(UserProfile::default())
    }

    async fn list_conversations(&self, _user_id: &str) -> Result<Vec<Conversation>, ApiError> {
        Ok(Vec::new())
    }

    async fn delete_conversation(&self, _conversation_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn rename_conversation(
        &self,
        _conversation_id: &str,
        _title: &str,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    async fn logout(&self, _user_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn fetch_weather_alerts(&self, _user_id: &str) -> Result<WeatherAlertBatch, ApiError> {
        Ok(WeatherAlertBatch::default())
    }

    async fn fetch_price_history(&self, _user_id: &str) -> Result<PriceHistory, ApiError> {
        Ok(PriceHistory::default())
    }
}

/// Builds a conversation with the given id, title, and timestamp.
pub fn conversation(id: &str, title: Option<&str>, timestamp: Option<&str>) -> Conversation {
    Conversation {
        conversation_id: id.to_string(),
        title: title.map(str::to_string),
        timestamp: timestamp.map(str::to_string),
    }
}

/// Builds a weather alert with the given severity and timestamp.
pub fn alert(severity: AlertSeverity, timestamp: &str) -> WeatherAlert {
    WeatherAlert {
        severity,
        icon: "⛈".to_string(),
        title: "Heavy rainfall expected".to_string(),
        message: "Protect harvested crops from moisture".to_string(),
        district: "Ludhiana".to_string(),
        timestamp: timestamp.to_string(),
    }
}
