pub mod csv;

pub use self::csv::{read_comments, read_scored, write_comments, write_scored, COMMENT_COLUMN};
