use thiserror::Error;

/// User-visible failures. None of them is fatal; callers surface them as
/// notifications and carry on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{name}: unsupported file type ({mime}); upload PDF, DOCX, TXT, or MD files")]
    UnsupportedFileType { name: String, mime: String },

    #[error("{name}: file is {size} bytes, maximum is {limit} bytes")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("{name}: could not extract text: {reason}")]
    ExtractionFailure { name: String, reason: String },

    #[error("free AI interactions used up ({used} used); upgrade to premium to continue")]
    UsageLimitExceeded { used: u32 },

    #[error("suggestion not found: {0}")]
    SuggestionNotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Storage(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = Error::FileTooLarge {
            name: "notes.pdf".into(),
            size: 10,
            limit: 5,
        };
        assert_eq!(
            err.to_string(),
            "notes.pdf: file is 10 bytes, maximum is 5 bytes"
        );
    }

    #[test]
    fn anyhow_errors_become_storage() {
        let err: Error = anyhow::anyhow!("disk full").into();
        assert!(matches!(err, Error::Storage(ref m) if m == "disk full"));
    }
}
