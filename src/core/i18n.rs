//! # Translation Resources
//!
//! Static bilingual string tables plus a process-wide locale setting.
//!
//! Lookup order: current-locale table first, then the English table, then
//! the key itself. Templates carry
//! `{{placeholder}}` markers substituted at render time via [`t_with`].
//!
//! The active locale is detected once at startup: persisted store value,
//! then the `LANG` environment variable, then English.

use std::sync::RwLock;

use clap::ValueEnum;
use log::info;
use once_cell::sync::Lazy;

/// Supported locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_lowercase();
        if code.starts_with("hi") {
            Some(Language::Hi)
        } else if code.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    /// The other locale; the switcher is a two-way toggle.
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }
}

static CURRENT: Lazy<RwLock<Language>> = Lazy::new(|| RwLock::new(Language::En));

/// Resolve the startup locale: stored value, then `LANG`, then English.
pub fn init(stored: Option<&str>) {
    let detected = stored
        .and_then(Language::from_code)
        .or_else(|| std::env::var("LANG").ok().as_deref().and_then(Language::from_code))
        .unwrap_or_default();
    set_language(detected);
    info!("locale initialized to {}", detected.code());
}

pub fn language() -> Language {
    *CURRENT.read().expect("locale lock poisoned")
}

pub fn set_language(lang: Language) {
    *CURRENT.write().expect("locale lock poisoned") = lang;
}

/// Translate `key` in the current locale.
pub fn t(key: &str) -> String {
    t_in(language(), key)
}

/// Translate `key` in an explicit locale: locale table, English fallback,
/// then the key itself.
pub fn t_in(lang: Language, key: &str) -> String {
    lookup(lang, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
        .to_string()
}

/// Translate and substitute `{{name}}` placeholders.
pub fn t_with(key: &str, args: &[(&str, &str)]) -> String {
    let mut text = t(key);
    for (name, value) in args {
        text = text.replace(&format!("{{{{{name}}}}}"), value);
    }
    text
}

fn lookup(lang: Language, key: &str) -> Option<&'static str> {
    let table = match lang {
        Language::En => EN,
        Language::Hi => HI,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

// ============================================================================
// Resource Tables
// ============================================================================

const EN: &[(&str, &str)] = &[
    ("agriSahayak", "Agri-Sahayak"),
    ("conversations", "Conversations"),
    ("newChat", "New Chat"),
    ("search", "Search"),
    ("searchConversations", "Search conversations..."),
    ("loading", "Loading..."),
    ("noConversationsYet", "No conversations yet"),
    ("startNewConversation", "Start a new conversation to get advice"),
    ("failedToLoadConversations", "Failed to load conversations"),
    ("untitledConversation", "Untitled conversation"),
    ("deleteConfirm", "Are you sure you want to delete this conversation?"),
    ("enterTitle", "Enter a title"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("rename", "Rename"),
    ("delete", "Delete"),
    ("moreActions", "More actions"),
    ("farmer", "Farmer"),
    ("logout", "Logout"),
    ("weatherAlerts", "Weather Alerts"),
    ("loadingAlerts", "Loading alerts..."),
    ("noWeatherAlerts", "No weather alerts at this time"),
    (
        "stayTuned",
        "We'll notify you of any weather conditions that may affect your crops",
    ),
    ("refreshing", "Refreshing..."),
    ("refresh", "Refresh"),
    ("quickStart", "Quick Start"),
    ("chooseCategory", "Choose a topic to begin"),
    ("farming", "Crop Advisory"),
    ("farming.subtitle", "Crop care, seeds, and pest control"),
    ("loans", "Finance & Loans"),
    ("loans.subtitle", "Loans, subsidies, and insurance schemes"),
    ("market_prices", "Market Prices"),
    ("market_prices.subtitle", "Mandi rates and price trends"),
    ("weather", "Weather"),
    ("weather.subtitle", "Forecasts and alerts for your crops"),
    ("livestock", "Livestock & Dairy"),
    ("livestock.subtitle", "Animal care, dairy, and poultry"),
    ("priceTrendChart.title", "Price Trend Chart"),
    ("priceTrendChart.noData", "No price data available"),
    ("price", "Price"),
    (
        "suggestions.general.marketPrices",
        "Show me current market prices for {{crop}} in {{state}}",
    ),
    (
        "suggestions.wheat.marketPrices",
        "Show me current market prices for wheat in {{state}}",
    ),
    (
        "suggestions.rice.variety",
        "What is the recommended paddy variety for {{state}}?",
    ),
];

const HI: &[(&str, &str)] = &[
    ("agriSahayak", "एग्री-सहायक"),
    ("conversations", "बातचीत"),
    ("newChat", "नई बातचीत"),
    ("search", "खोजें"),
    ("searchConversations", "बातचीत खोजें..."),
    ("loading", "लोड हो रहा है..."),
    ("noConversationsYet", "अभी तक कोई बातचीत नहीं"),
    ("startNewConversation", "सलाह पाने के लिए नई बातचीत शुरू करें"),
    ("failedToLoadConversations", "बातचीत लोड करने में विफल"),
    ("untitledConversation", "बिना शीर्षक की बातचीत"),
    ("deleteConfirm", "क्या आप वाकई इस बातचीत को हटाना चाहते हैं?"),
    ("enterTitle", "शीर्षक दर्ज करें"),
    ("save", "सहेजें"),
    ("cancel", "रद्द करें"),
    ("rename", "नाम बदलें"),
    ("delete", "हटाएं"),
    ("moreActions", "अधिक विकल्प"),
    ("farmer", "किसान"),
    ("logout", "लॉगआउट"),
    ("weatherAlerts", "मौसम चेतावनी"),
    ("loadingAlerts", "चेतावनियां लोड हो रही हैं..."),
    ("noWeatherAlerts", "इस समय कोई मौसम चेतावनी नहीं"),
    (
        "stayTuned",
        "आपकी फसलों को प्रभावित करने वाली मौसम स्थितियों की सूचना हम आपको देंगे",
    ),
    ("refreshing", "ताज़ा हो रहा है..."),
    ("refresh", "ताज़ा करें"),
    ("quickStart", "त्वरित शुरुआत"),
    ("chooseCategory", "शुरू करने के लिए एक विषय चुनें"),
    ("farming", "फसल सलाह"),
    ("farming.subtitle", "फसल देखभाल, बीज और कीट नियंत्रण"),
    ("loans", "वित्त और ऋण"),
    ("loans.subtitle", "ऋण, सब्सिडी और बीमा योजनाएं"),
    ("market_prices", "बाज़ार भाव"),
    ("market_prices.subtitle", "मंडी दरें और मूल्य रुझान"),
    ("weather", "मौसम"),
    ("weather.subtitle", "आपकी फसलों के लिए पूर्वानुमान और चेतावनियां"),
    ("livestock", "पशुपालन और डेयरी"),
    ("livestock.subtitle", "पशु देखभाल, डेयरी और मुर्गी पालन"),
    ("priceTrendChart.title", "मूल्य प्रवृत्ति चार्ट"),
    ("priceTrendChart.noData", "कोई मूल्य डेटा उपलब्ध नहीं"),
    ("price", "भाव"),
    (
        "suggestions.general.marketPrices",
        "{{state}} में {{crop}} के वर्तमान बाजार भाव दिखाएं",
    ),
    (
        "suggestions.wheat.marketPrices",
        "{{state}} में गेहूं के वर्तमान बाजार भाव दिखाएं",
    ),
    (
        "suggestions.rice.variety",
        "{{state}} के लिए अनुशंसित धान की किस्म क्या है?",
    ),
];
