pub mod comment;
pub mod stats;

pub use comment::*;
pub use stats::*;
