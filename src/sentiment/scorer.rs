/// A polarity model mapping text to a compound score in `[-1, 1]`.
pub trait SentimentScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
    fn name(&self) -> &str;
}

/// Scores one comment. A missing comment scores exactly `0.0`, so it still
/// counts toward corpus statistics as a neutral record.
pub fn score_comment(scorer: &dyn SentimentScorer, comment: Option<&str>) -> f64 {
    match comment {
        Some(text) => scorer.compound(text),
        None => 0.0,
    }
}
