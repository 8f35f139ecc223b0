use std::sync::Arc;

use chrono::Utc;

use crate::analysis::aggregator::aggregate;
use crate::config::AnalysisPaths;
use crate::error::{Error, Result};
use crate::models::{CommentRecord, ScoredComment, SentimentStats};
use crate::report::{render_pie_chart, Reporter};
use crate::sentiment::{score_comment, SentimentScorer};
use crate::storage;

pub const CHART_TITLE: &str = "Sentiment distribution of forum comments";

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<ScoredComment>,
    pub stats: SentimentStats,
}

/// Result of a file-level run. Output failures do not invalidate the
/// statistics, which were already reported when they happened.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub output: PipelineOutput,
    pub report: String,
    pub output_failures: Vec<Error>,
}

impl AnalysisOutcome {
    pub fn is_complete(&self) -> bool {
        self.output_failures.is_empty()
    }
}

pub struct SentimentPipeline {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentPipeline {
    pub fn new(scorer: impl SentimentScorer + 'static) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Scores and categorizes each record, in input order.
    pub fn enrich(&self, raw: Vec<CommentRecord>) -> Vec<ScoredComment> {
        raw.into_iter()
            .map(|record| {
                let score = score_comment(self.scorer.as_ref(), record.text());
                ScoredComment::new(record.comment, score)
            })
            .collect()
    }

    pub fn run(&self, raw: Vec<CommentRecord>) -> PipelineOutput {
        tracing::info!("Scoring {} comments with {}", raw.len(), self.scorer_name());
        let records = self.enrich(raw);
        let stats = aggregate(&records);
        PipelineOutput { records, stats }
    }

    /// Loads comments from `paths.input`, runs the pipeline and renders the
    /// report, then writes the results CSV and the chart.
    ///
    /// An unreadable input aborts before any scoring.
    pub fn analyze_file(&self, paths: &AnalysisPaths, reporter: &Reporter) -> Result<AnalysisOutcome> {
        let raw = storage::read_comments(&paths.input)?;
        tracing::info!("Loaded {} comments from {}", raw.len(), paths.input.display());

        let output = self.run(raw);
        let report = reporter.render(&output.stats, Utc::now())?;

        let mut output_failures = Vec::new();

        match storage::write_scored(&paths.results, &output.records) {
            Ok(()) => tracing::info!("Detailed results saved to {}", paths.results.display()),
            Err(e) => {
                tracing::error!("{}", e);
                output_failures.push(e);
            }
        }

        if output.stats.is_empty() {
            tracing::warn!("No comments to plot, skipping chart");
        } else {
            match render_pie_chart(&output.stats.category_counts(), &paths.chart, CHART_TITLE) {
                Ok(()) => tracing::info!("Sentiment chart saved to {}", paths.chart.display()),
                Err(e) => {
                    tracing::error!("{}", e);
                    output_failures.push(e);
                }
            }
        }

        Ok(AnalysisOutcome {
            output,
            report,
            output_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentCategory;
    use crate::report::OutputFormat;
    use crate::sentiment::vader::{tests::test_lexicon, VaderScorer};

    fn pipeline() -> SentimentPipeline {
        SentimentPipeline::new(VaderScorer::new(test_lexicon()).unwrap())
    }

    #[test]
    fn test_mixed_comments_end_to_end() {
        let raw = vec![
            CommentRecord::new("great buy"),
            CommentRecord::new("terrible crash"),
            CommentRecord::new(""),
            CommentRecord::missing(),
        ];
        let output = pipeline().run(raw);

        let scores: Vec<f64> = output.records.iter().map(|r| r.sentiment_score).collect();
        assert!(scores[0] > 0.5);
        assert!(scores[1] < -0.4);
        assert_eq!(scores[2], 0.0);
        assert_eq!(scores[3], 0.0);

        let categories: Vec<_> = output.records.iter().map(|r| r.sentiment_category).collect();
        assert_eq!(
            categories,
            vec![
                SentimentCategory::Positive,
                SentimentCategory::Negative,
                SentimentCategory::Neutral,
                SentimentCategory::Neutral,
            ]
        );

        assert_eq!(output.stats.total_comments, 4);
        assert_eq!(output.stats.percentage_of(SentimentCategory::Neutral), Some(50.0));
        assert_eq!(output.records[3].comment, None);
    }

    #[test]
    fn test_empty_input_end_to_end() {
        let output = pipeline().run(Vec::new());
        assert!(output.records.is_empty());
        assert_eq!(output.stats.total_comments, 0);
        assert_eq!(output.stats.average_score, None);
        assert_eq!(output.stats.median_score, None);
        assert!(output.stats.category_breakdown.is_empty());
    }

    #[test]
    fn test_analyze_file_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AnalysisPaths {
            input: dir.path().join("comments.csv"),
            results: dir.path().join("results.csv"),
            chart: dir.path().join("chart.svg"),
        };
        std::fs::write(&paths.input, "Comment\ngreat buy\n\nterrible crash\n").unwrap();

        let outcome = pipeline()
            .analyze_file(&paths, &Reporter::new(OutputFormat::Text))
            .unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.output.records.len(), 2);
        assert!(outcome.report.contains("Total comments: 2"));

        let written = storage::read_scored(&paths.results).unwrap();
        assert_eq!(written, outcome.output.records);
        assert!(paths.chart.exists());
    }

    #[test]
    fn test_analyze_file_missing_input_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AnalysisPaths {
            input: dir.path().join("absent.csv"),
            results: dir.path().join("results.csv"),
            chart: dir.path().join("chart.svg"),
        };

        let err = pipeline()
            .analyze_file(&paths, &Reporter::new(OutputFormat::Text))
            .unwrap_err();
        assert!(matches!(err, Error::InputLoad { .. }));
        assert!(!paths.results.exists());
        assert!(!paths.chart.exists());
    }

    #[test]
    fn test_output_failures_keep_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AnalysisPaths {
            input: dir.path().join("comments.csv"),
            results: dir.path().join("missing_dir").join("results.csv"),
            chart: dir.path().join("missing_dir").join("chart.svg"),
        };
        std::fs::write(&paths.input, "Comment\ngreat buy\n").unwrap();

        let outcome = pipeline()
            .analyze_file(&paths, &Reporter::new(OutputFormat::Text))
            .unwrap();

        assert!(!outcome.is_complete());
        assert_eq!(outcome.output_failures.len(), 2);
        assert!(outcome.output_failures.iter().all(Error::is_output_failure));
        assert_eq!(outcome.output.stats.total_comments, 1);
    }

    #[test]
    fn test_analyze_file_header_only_input() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AnalysisPaths {
            input: dir.path().join("comments.csv"),
            results: dir.path().join("results.csv"),
            chart: dir.path().join("chart.svg"),
        };
        std::fs::write(&paths.input, "Comment\n").unwrap();

        let outcome = pipeline()
            .analyze_file(&paths, &Reporter::new(OutputFormat::Text))
            .unwrap();

        assert!(outcome.is_complete());
        assert!(outcome.output.records.is_empty());
        assert_eq!(outcome.output.stats.average_score, None);
        assert!(outcome.report.contains("Average sentiment score: undefined"));

        assert!(storage::read_scored(&paths.results).unwrap().is_empty());
        let header = std::fs::read_to_string(&paths.results).unwrap();
        assert_eq!(header.lines().count(), 1);
        assert!(header.starts_with("Comment,"));
        assert!(!paths.chart.exists());
    }
}
