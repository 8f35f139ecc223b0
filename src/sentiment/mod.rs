pub mod category;
pub mod lexicon;
pub mod scorer;
pub mod vader;

pub use category::categorize;
pub use lexicon::Lexicon;
pub use scorer::{score_comment, SentimentScorer};
pub use vader::{PolarityScores, VaderScorer};
