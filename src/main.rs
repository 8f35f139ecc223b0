use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use forum_sentiment::{
    forum, AnalysisPaths, Config, ForumClient, Lexicon, OutputFormat, Reporter, ScrapeConfig,
    SentimentPipeline, VaderScorer,
};

#[derive(Parser, Debug)]
#[command(name = "forum-sentiment")]
#[command(version = "0.1.0")]
#[command(about = "Scrape forum comments and summarize their sentiment")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Summary format (text, markdown, json)
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect comments from the forum into a CSV file
    Scrape(ScrapeArgs),
    /// Score an existing comment CSV
    Analyze(AnalyzeArgs),
    /// Scrape, then analyze the freshly collected comments
    Run {
        #[command(flatten)]
        scrape: ScrapeArgs,
        #[command(flatten)]
        analyze: OutputArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct ScrapeArgs {
    /// Forum URL; pages are requested with `?p=N`
    #[arg(long)]
    url: Option<String>,

    /// Number of pages to crawl
    #[arg(short, long)]
    pages: Option<u32>,

    /// CSV file receiving the scraped comments
    #[arg(short, long)]
    comments: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct AnalyzeArgs {
    /// CSV file with a `Comment` column
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// CSV file receiving scores and categories
    #[arg(short, long)]
    results: Option<PathBuf>,

    /// SVG file receiving the pie chart
    #[arg(long)]
    chart: Option<PathBuf>,

    /// VADER lexicon file, downloaded when missing
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("forum_sentiment=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env();
    let reporter = Reporter::new(args.format);

    match args.command {
        Command::Scrape(scrape) => {
            apply_scrape_args(&mut config, scrape);
            scrape_comments(&config).await?;
        }
        Command::Analyze(analyze) => {
            if let Some(input) = analyze.input {
                config.comments_csv = input;
            }
            apply_output_args(&mut config, analyze.output);
            let pipeline = build_pipeline(&config).await?;
            analyze_comments(&pipeline, &config, &reporter)?;
        }
        Command::Run { scrape, analyze } => {
            apply_scrape_args(&mut config, scrape);
            apply_output_args(&mut config, analyze);
            let pipeline = build_pipeline(&config).await?;

            tracing::info!("Starting scrape");
            if scrape_comments(&config).await? == 0 {
                tracing::warn!("Nothing to analyze");
                return Ok(());
            }
            tracing::info!("Starting sentiment analysis");
            analyze_comments(&pipeline, &config, &reporter)?;
            tracing::info!("Process complete");
        }
    }

    Ok(())
}

fn apply_scrape_args(config: &mut Config, args: ScrapeArgs) {
    if let Some(url) = args.url {
        config.forum_url = url;
    }
    if let Some(pages) = args.pages {
        config.max_pages = pages;
    }
    if let Some(comments) = args.comments {
        config.comments_csv = comments;
    }
}

fn apply_output_args(config: &mut Config, args: OutputArgs) {
    if let Some(results) = args.results {
        config.results_csv = results;
    }
    if let Some(chart) = args.chart {
        config.chart_path = chart;
    }
    if let Some(lexicon) = args.lexicon {
        config.lexicon_path = lexicon;
    }
}

async fn scrape_comments(config: &Config) -> anyhow::Result<usize> {
    let scrape_config = ScrapeConfig::from(config);
    let client = ForumClient::new(&scrape_config)?;
    let count = forum::scrape_to_csv(&client, &scrape_config, &config.comments_csv).await?;
    Ok(count)
}

/// Acquires the lexicon before any other work, so a missing resource fails
/// the process before the forum is crawled.
async fn build_pipeline(config: &Config) -> anyhow::Result<SentimentPipeline> {
    let http = reqwest::Client::new();
    let lexicon = Lexicon::ensure(&http, &config.lexicon_path, &config.lexicon_url).await?;
    Ok(SentimentPipeline::new(VaderScorer::new(lexicon)?))
}

fn analyze_comments(
    pipeline: &SentimentPipeline,
    config: &Config,
    reporter: &Reporter,
) -> anyhow::Result<()> {
    let paths = AnalysisPaths::from(config);
    let outcome = pipeline.analyze_file(&paths, reporter)?;

    println!("{}", outcome.report);

    if !outcome.is_complete() {
        tracing::warn!(
            "Analysis finished with {} output failure(s); statistics above are still valid",
            outcome.output_failures.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_lexicon_fails_before_scraping() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::from_env();
        config.lexicon_path = dir.path().join("missing_dir").join("lexicon.txt");
        config.lexicon_url = "http://127.0.0.1:9/vader_lexicon.txt".to_string();
        config.comments_csv = dir.path().join("comments.csv");

        let err = build_pipeline(&config).await.err().unwrap();
        assert!(matches!(
            err.downcast_ref::<forum_sentiment::Error>(),
            Some(forum_sentiment::Error::ResourceUnavailable(_))
        ));
        assert!(!config.comments_csv.exists());
    }
}
