use std::cmp::Ordering;

use crate::models::{CategoryShare, ScoredComment, SentimentCategory, SentimentStats, TOP_N};

/// Computes corpus statistics over scored comments.
///
/// An empty corpus yields `None` for both the average and the median and an
/// empty breakdown. Breakdown entries are ordered by count, highest first,
/// with ties in `SentimentCategory::ALL` order.
pub fn aggregate(records: &[ScoredComment]) -> SentimentStats {
    let total_comments = records.len();
    let scores: Vec<f64> = records.iter().map(|r| r.sentiment_score).collect();

    SentimentStats {
        total_comments,
        category_breakdown: category_breakdown(records),
        average_score: mean(&scores),
        median_score: median(&scores),
        top_positive: top_by(records, |a, b| b.total_cmp(a)),
        top_negative: top_by(records, |a, b| a.total_cmp(b)),
    }
}

fn category_breakdown(records: &[ScoredComment]) -> Vec<CategoryShare> {
    if records.is_empty() {
        return Vec::new();
    }

    let total = records.len() as f64;
    let mut shares: Vec<CategoryShare> = SentimentCategory::ALL
        .iter()
        .map(|&category| {
            let count = records
                .iter()
                .filter(|r| r.sentiment_category == category)
                .count();
            CategoryShare {
                category,
                count,
                percentage: count as f64 / total * 100.0,
            }
        })
        .filter(|share| share.count > 0)
        .collect();

    // stable, so equal counts keep the ALL order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

fn median(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Stable sort, so records with equal scores keep their input order.
fn top_by<F>(records: &[ScoredComment], order: F) -> Vec<ScoredComment>
where
    F: Fn(&f64, &f64) -> Ordering,
{
    let mut ranked: Vec<&ScoredComment> = records.iter().collect();
    ranked.sort_by(|a, b| order(&a.sentiment_score, &b.sentiment_score));
    ranked.into_iter().take(TOP_N).cloned().collect()
}
