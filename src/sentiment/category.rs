use crate::models::SentimentCategory;

#[derive(Debug, Clone, Copy)]
enum Cutoff {
    Above(f64),
    Below(f64),
}

impl Cutoff {
    fn admits(self, score: f64) -> bool {
        match self {
            Cutoff::Above(threshold) => score > threshold,
            Cutoff::Below(threshold) => score < threshold,
        }
    }
}

/// Evaluated in order; a score matching no rule is neutral.
const RULES: [(Cutoff, SentimentCategory); 2] = [
    (Cutoff::Above(0.05), SentimentCategory::Positive),
    (Cutoff::Below(-0.05), SentimentCategory::Negative),
];

/// Maps a compound score to its category. Both thresholds are exclusive,
/// so `0.05` and `-0.05` are neutral.
pub fn categorize(score: f64) -> SentimentCategory {
    RULES
        .iter()
        .find(|(cutoff, _)| cutoff.admits(score))
        .map(|(_, category)| *category)
        .unwrap_or(SentimentCategory::Neutral)
}
