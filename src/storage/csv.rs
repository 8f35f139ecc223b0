use std::path::Path;

use csv::{ReaderBuilder, Writer};

use crate::error::{Error, Result};
use crate::models::{CommentRecord, ScoredComment};

pub const COMMENT_COLUMN: &str = "Comment";

/// Reads the `Comment` column of a CSV file. Other columns are ignored and
/// empty fields become missing comments.
pub fn read_comments<P: AsRef<Path>>(path: P) -> Result<Vec<CommentRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::input_load(path, e))?;

    let headers = reader.headers().map_err(|e| Error::input_load(path, e))?;
    let column = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == COMMENT_COLUMN)
        .ok_or_else(|| {
            Error::input_load(path, format!("missing '{}' column", COMMENT_COLUMN))
        })?;

    let mut comments = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::input_load(path, e))?;
        let comment = row.get(column).filter(|text| !text.is_empty());
        comments.push(CommentRecord::from(comment));
    }

    tracing::debug!("Read {} comments from {}", comments.len(), path.display());
    Ok(comments)
}

pub fn write_comments<P: AsRef<Path>>(path: P, comments: &[String]) -> Result<()> {
    let path = path.as_ref();
    let write = || -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([COMMENT_COLUMN])?;
        for comment in comments {
            writer.write_record([comment])?;
        }
        writer.flush()?;
        Ok(())
    };
    write().map_err(|e| Error::output_write(path, e))
}

/// Writes `Comment,sentiment_score,sentiment_category` rows in input order.
pub fn write_scored<P: AsRef<Path>>(path: P, records: &[ScoredComment]) -> Result<()> {
    let path = path.as_ref();
    let write = || -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        for record in records {
            writer.serialize(record)?;
        }
        if records.is_empty() {
            writer.write_record([COMMENT_COLUMN, "sentiment_score", "sentiment_category"])?;
        }
        writer.flush()?;
        Ok(())
    };
    write().map_err(|e| Error::output_write(path, e))
}

pub fn read_scored<P: AsRef<Path>>(path: P) -> Result<Vec<ScoredComment>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .from_path(path)
        .map_err(|e| Error::input_load(path, e))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<ScoredComment>, _>>()
        .map_err(|e| Error::input_load(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SentimentCategory;

    #[test]
    fn test_read_comments_with_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        std::fs::write(&path, "Author,Comment\nalice,great buy\nbob,\ncarol,\"to the moon, again\"\n")
            .unwrap();

        let comments = read_comments(&path).unwrap();
        assert_eq!(
            comments,
            vec![
                CommentRecord::new("great buy"),
                CommentRecord::missing(),
                CommentRecord::new("to the moon, again"),
            ]
        );
    }

    #[test]
    fn test_read_comments_requires_comment_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        std::fs::write(&path, "Text\nhello\n").unwrap();

        let err = read_comments(&path).unwrap_err();
        assert!(matches!(err, Error::InputLoad { .. }));
    }

    #[test]
    fn test_read_comments_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_comments(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::InputLoad { .. }));
    }

    #[test]
    fn test_read_comments_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        std::fs::write(&path, b"Comment\n\xff\xfe bad\n").unwrap();

        let err = read_comments(&path).unwrap_err();
        assert!(matches!(err, Error::InputLoad { .. }));
    }

    #[test]
    fn test_written_comments_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        let comments = vec!["first".to_string(), "second, with comma".to_string()];

        write_comments(&path, &comments).unwrap();
        let read = read_comments(&path).unwrap();
        assert_eq!(read, vec![CommentRecord::new("first"), CommentRecord::new("second, with comma")]);
    }

    #[test]
    fn test_scored_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let records = vec![
            ScoredComment::new(Some("great buy".to_string()), 0.6249),
            ScoredComment::new(Some("terrible \"crash\"".to_string()), -0.4767),
            ScoredComment::new(None, 0.0),
        ];

        write_scored(&path, &records).unwrap();
        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with("Comment,sentiment_score,sentiment_category\n"));

        let read = read_scored(&path).unwrap();
        assert_eq!(read.len(), records.len());
        for (original, loaded) in records.iter().zip(&read) {
            assert_eq!(original.comment, loaded.comment);
            assert!((original.sentiment_score - loaded.sentiment_score).abs() < 1e-9);
            assert_eq!(original.sentiment_category, loaded.sentiment_category);
        }
        assert_eq!(read[2].sentiment_category, SentimentCategory::Neutral);
    }

    #[test]
    fn test_write_scored_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("results.csv");
        let err = write_scored(&path, &[]).unwrap_err();
        assert!(err.is_output_failure());
    }
}
