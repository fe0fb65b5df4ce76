use serde::{Deserialize, Serialize};

pub const SUMMARY_MAX_CHARS: usize = 160;
pub const SUMMARY_ELLIPSIS: &str = "...";
pub const EMPTY_SUMMARY: &str = "No input provided";

pub const OPINIONATED_CONFIDENCE: f64 = 0.72;
pub const NEUTRAL_CONFIDENCE: f64 = 0.55;

/// Keyword groups scanned in priority order; each contributes at most one item.
const ACTION_RULES: &[(&[&str], &str)] = &[
    (&["meeting", "call", "sync", "demo"], "Schedule a follow-up meeting"),
    (&["price", "budget", "quote", "discount"], "Send pricing proposal"),
    (&["integration", "api", "trial", "pilot"], "Share technical integration guide"),
];

const FALLBACK_ACTIONS: &[&str] = &[
    "Send a thank-you email",
    "Log the conversation in the CRM",
    "Set a reminder to follow up in 3 days",
];

const POSITIVE_KEYWORDS: &[&str] = &["great", "good", "excited", "love"];
const NEGATIVE_KEYWORDS: &[&str] = &["concern", "issue", "problem", "delay"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn confidence(self) -> f64 {
        match self {
            Self::Neutral => NEUTRAL_CONFIDENCE,
            Self::Positive | Self::Negative => OPINIONATED_CONFIDENCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub summary: String,
    pub sentiment: Sentiment,
    pub action_items: Vec<String>,
    pub confidence: f64,
}

#[derive(Clone, Debug, Default)]
pub struct InsightsEngine;

impl InsightsEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> Insights {
        let trimmed = text.trim();
        let normalized = trimmed.to_lowercase();
        let sentiment = classify_sentiment(&normalized);

        Insights {
            summary: summarize(trimmed),
            sentiment,
            action_items: extract_action_items(&normalized),
            confidence: sentiment.confidence(),
        }
    }
}

pub fn analyze(text: &str) -> Insights {
    InsightsEngine::new().analyze(text)
}

fn summarize(trimmed: &str) -> String {
    if trimmed.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    match trimmed.char_indices().nth(SUMMARY_MAX_CHARS) {
        Some((cut, _)) => format!("{}{SUMMARY_ELLIPSIS}", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

fn extract_action_items(normalized: &str) -> Vec<String> {
    let matched: Vec<String> = ACTION_RULES
        .iter()
        .filter(|(keywords, _)| contains_any(normalized, keywords))
        .map(|(_, action)| (*action).to_string())
        .collect();

    if matched.is_empty() {
        FALLBACK_ACTIONS.iter().map(|action| (*action).to_string()).collect()
    } else {
        matched
    }
}

// Positive wins when both keyword sets appear.
fn classify_sentiment(normalized: &str) -> Sentiment {
    if contains_any(normalized, POSITIVE_KEYWORDS) {
        Sentiment::Positive
    } else if contains_any(normalized, NEGATIVE_KEYWORDS) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
