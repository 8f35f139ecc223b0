pub mod config;
pub mod error;
pub mod models;
pub mod sentiment;
pub mod forum;
pub mod analysis;
pub mod report;
pub mod storage;

pub use config::{AnalysisPaths, Config, ScrapeConfig};
pub use error::{Error, Result};
pub use forum::{ForumClient, PageSource};
pub use sentiment::{Lexicon, SentimentScorer, VaderScorer};
pub use analysis::SentimentPipeline;
pub use report::{OutputFormat, Reporter};
