pub mod client;
pub mod types;

pub use client::{AdvisoryApi, ApiError, DEFAULT_SERVER_URL, HttpAdvisoryApi};
pub use types::{
    AlertSeverity, Conversation, PriceHistory, PricePoint, UserProfile, WeatherAlert,
    WeatherAlertBatch,
};
