use thiserror::Error;

/// Why a single log line was rejected by the parser.
///
/// These never escape the pipeline: the parser logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected 4 comma-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid time of day {value:?}: {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("invalid entry kind {0:?}, expected START or END")]
    InvalidKind(String),

    #[error("invalid process id {0:?}")]
    InvalidProcessId(String),
}

/// Errors raised by the layers around the pipeline (files, config, HTTP uploads).
#[derive(Debug, Error)]
pub enum JoblogError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Upload is missing the `file` field")]
    MissingUpload,

    #[error("Upload is not valid UTF-8 text")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_error_display() {
        assert_eq!(
            LineError::FieldCount(3).to_string(),
            "expected 4 comma-separated fields, found 3"
        );
        assert_eq!(
            LineError::InvalidKind("BEGIN".into()).to_string(),
            "invalid entry kind \"BEGIN\", expected START or END"
        );
        assert_eq!(
            LineError::InvalidProcessId("abc".into()).to_string(),
            "invalid process id \"abc\""
        );
    }

    #[test]
    fn joblog_error_display() {
        assert_eq!(
            JoblogError::MissingUpload.to_string(),
            "Upload is missing the `file` field"
        );
        assert_eq!(
            JoblogError::Config("bad threshold".into()).to_string(),
            "Config error: bad threshold"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LineError>();
        assert_send_sync::<JoblogError>();
    }
}
