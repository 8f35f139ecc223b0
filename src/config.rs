use std::env;
use std::path::PathBuf;

pub const DEFAULT_FORUM_URL: &str = "https://www.abcbourse.com/forums/bitcoin_10447";
pub const DEFAULT_SELECTOR: &str = "a.lfor";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";
pub const DEFAULT_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/cjhutto/vaderSentiment/master/vaderSentiment/vader_lexicon.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub forum_url: String,
    pub max_pages: u32,
    pub comment_selector: String,
    pub user_agent: String,
    pub fetch_concurrency: usize,
    pub lexicon_path: PathBuf,
    pub lexicon_url: String,
    pub comments_csv: PathBuf,
    pub results_csv: PathBuf,
    pub chart_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let forum_url = env::var("FORUM_URL").unwrap_or_else(|_| DEFAULT_FORUM_URL.to_string());

        let max_pages = env::var("FORUM_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let comment_selector =
            env::var("FORUM_SELECTOR").unwrap_or_else(|_| DEFAULT_SELECTOR.to_string());

        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let fetch_concurrency = env::var("FETCH_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(4);

        let lexicon_path = env::var("LEXICON_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("vader_lexicon.txt"));

        let lexicon_url =
            env::var("LEXICON_URL").unwrap_or_else(|_| DEFAULT_LEXICON_URL.to_string());

        let comments_csv = env::var("COMMENTS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("forum_comments.csv"));

        let results_csv = env::var("RESULTS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("sentiment_results.csv"));

        let chart_path = env::var("CHART_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("sentiment_pie_chart.svg"));

        Self {
            forum_url,
            max_pages,
            comment_selector,
            user_agent,
            fetch_concurrency,
            lexicon_path,
            lexicon_url,
            comments_csv,
            results_csv,
            chart_path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub max_pages: u32,
    pub comment_selector: String,
    pub user_agent: String,
    pub concurrency: usize,
}

impl From<&Config> for ScrapeConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.forum_url.clone(),
            max_pages: config.max_pages,
            comment_selector: config.comment_selector.clone(),
            user_agent: config.user_agent.clone(),
            concurrency: config.fetch_concurrency,
        }
    }
}

/// File locations touched by one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisPaths {
    pub input: PathBuf,
    pub results: PathBuf,
    pub chart: PathBuf,
}

impl From<&Config> for AnalysisPaths {
    fn from(config: &Config) -> Self {
        Self {
            input: config.comments_csv.clone(),
            results: config.results_csv.clone(),
            chart: config.chart_path.clone(),
        }
    }
}
