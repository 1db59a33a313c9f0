pub mod activity_bar;
pub mod category_selector;
pub mod conversation_sidebar;
pub mod language_switcher;
pub mod price_chart;
pub mod profile_badge;
pub mod weather_alerts;
