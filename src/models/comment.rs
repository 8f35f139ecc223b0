use serde::{Deserialize, Serialize};

use crate::sentiment::categorize;

/// A comment as collected from the forum. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub comment: Option<String>,
}

impl CommentRecord {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
        }
    }

    pub fn missing() -> Self {
        Self { comment: None }
    }

    pub fn text(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl From<Option<&str>> for CommentRecord {
    fn from(comment: Option<&str>) -> Self {
        Self {
            comment: comment.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comment enriched with its polarity score and the category derived from it.
///
/// Field names follow the persisted CSV columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComment {
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
    pub sentiment_score: f64,
    pub sentiment_category: SentimentCategory,
}

impl ScoredComment {
    pub fn new(comment: Option<String>, sentiment_score: f64) -> Self {
        Self {
            comment,
            sentiment_score,
            sentiment_category: categorize(sentiment_score),
        }
    }

    pub fn text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}
