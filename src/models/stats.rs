use serde::{Deserialize, Serialize};

use super::comment::{ScoredComment, SentimentCategory};

/// Number of records kept in each extreme list.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: SentimentCategory,
    pub count: usize,
    pub percentage: f64,
}

/// Corpus-level statistics of one analysis run.
///
/// `average_score` and `median_score` are `None` for an empty corpus.
/// `category_breakdown` only lists categories that were observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub total_comments: usize,
    pub category_breakdown: Vec<CategoryShare>,
    pub average_score: Option<f64>,
    pub median_score: Option<f64>,
    pub top_positive: Vec<ScoredComment>,
    pub top_negative: Vec<ScoredComment>,
}

impl SentimentStats {
    pub fn percentage_of(&self, category: SentimentCategory) -> Option<f64> {
        self.category_breakdown
            .iter()
            .find(|share| share.category == category)
            .map(|share| share.percentage)
    }

    /// Raw counts per observed category, in breakdown order.
    pub fn category_counts(&self) -> Vec<(SentimentCategory, usize)> {
        self.category_breakdown
            .iter()
            .map(|share| (share.category, share.count))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_comments == 0
    }
}
