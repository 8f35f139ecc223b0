use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::models::{ScoredComment, SentimentStats, TOP_N};

const COMMENT_DISPLAY_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    stats: &'a SentimentStats,
}

#[derive(Debug, Clone, Default)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, stats: &SentimentStats, analyzed_at: DateTime<Utc>) -> Result<String> {
        let output = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&JsonReport { analyzed_at, stats })?,
            OutputFormat::Markdown => format_markdown(stats, analyzed_at),
            OutputFormat::Text => format_text(stats, analyzed_at),
        };
        Ok(output)
    }
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.4}", s))
        .unwrap_or_else(|| "undefined".to_string())
}

/// Single-line, width-limited rendering of a comment for tables.
fn display_comment(record: &ScoredComment, escape_pipes: bool) -> String {
    let flat: String = record
        .text()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut shown = if flat.chars().count() > COMMENT_DISPLAY_WIDTH {
        let mut cut: String = flat.chars().take(COMMENT_DISPLAY_WIDTH - 3).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    };

    if escape_pipes {
        shown = shown.replace('|', "\\|");
    }
    shown
}

fn format_text(stats: &SentimentStats, analyzed_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("\n=== Sentiment Analysis Summary ===\n\n");
    output.push_str(&format!("Total comments: {}\n", stats.total_comments));

    output.push_str("\nSentiment breakdown:\n");
    if stats.category_breakdown.is_empty() {
        output.push_str("  (no comments)\n");
    }
    for share in &stats.category_breakdown {
        output.push_str(&format!("  {}: {:.2}%\n", share.category, share.percentage));
    }

    output.push_str(&format!(
        "\nAverage sentiment score: {}\n",
        format_score(stats.average_score)
    ));
    output.push_str(&format!(
        "Median sentiment score: {}\n",
        format_score(stats.median_score)
    ));

    for (title, records) in [
        ("most positive", &stats.top_positive),
        ("most negative", &stats.top_negative),
    ] {
        output.push_str(&format!("\n{} {} comments:\n", TOP_N, title));
        if records.is_empty() {
            output.push_str("  (none)\n");
            continue;
        }
        output.push_str(&format!("  {:>2}  {:>7}  {:<8}  {}\n", "#", "Score", "Category", "Comment"));
        for (idx, record) in records.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}  {:>7.4}  {:<8}  {}\n",
                idx + 1,
                record.sentiment_score,
                record.sentiment_category.as_str(),
                display_comment(record, false)
            ));
        }
    }

    output.push_str(&format!(
        "\n---\nAnalyzed on {}\n",
        analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(stats: &SentimentStats, analyzed_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("# Sentiment Analysis Summary\n\n");
    output.push_str(&format!("**Total comments:** {}\n\n", stats.total_comments));

    output.push_str("## Sentiment Breakdown\n\n");
    if stats.category_breakdown.is_empty() {
        output.push_str("_No comments analyzed._\n");
    } else {
        output.push_str("| Category | Count | Share |\n|----------|-------|-------|\n");
        for share in &stats.category_breakdown {
            output.push_str(&format!(
                "| {} | {} | {:.2}% |\n",
                share.category, share.count, share.percentage
            ));
        }
    }

    output.push_str(&format!(
        "\n- **Average score:** {}\n- **Median score:** {}\n",
        format_score(stats.average_score),
        format_score(stats.median_score)
    ));

    for (title, records) in [
        ("Most Positive", &stats.top_positive),
        ("Most Negative", &stats.top_negative),
    ] {
        output.push_str(&format!("\n## {} {} Comments\n\n", TOP_N, title));
        if records.is_empty() {
            output.push_str("_None._\n");
            continue;
        }
        output.push_str("| Comment | Score | Category |\n|---------|-------|----------|\n");
        for record in records.iter() {
            output.push_str(&format!(
                "| {} | {:.4} | {} |\n",
                display_comment(record, true),
                record.sentiment_score,
                record.sentiment_category
            ));
        }
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
