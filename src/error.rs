use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corpus `{name}` unavailable: {reason}")]
    Corpus { name: String, reason: String },

    #[error("unsupported test duration: {0}s (expected 15, 30 or 60)")]
    InvalidDuration(u32),
}

impl Error {
    pub fn corpus(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corpus {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_duration() {
        let err = Error::InvalidDuration(45);
        assert_eq!(
            err.to_string(),
            "unsupported test duration: 45s (expected 15, 30 or 60)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("i/o failure"));
    }

    #[test]
    fn test_corpus_helper() {
        let err = Error::corpus("klingon", "not embedded");
        assert_eq!(err.to_string(), "corpus `klingon` unavailable: not embedded");
    }
}
