use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a summary run. None of them are retried.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot read input {}", .path.display())]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid report JSON in {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write summary {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SummaryError {
    /// Short name of the error class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::InputAccess { .. } => "input_access",
            SummaryError::Decode { .. } => "decode",
            SummaryError::OutputWrite { .. } => "output_write",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = SummaryError::InputAccess {
            path: PathBuf::from("../reports"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read input ../reports");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("gone"));
        assert_eq!(err.kind(), "input_access");
    }

    #[test]
    fn test_decode_kind() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SummaryError::Decode {
            path: PathBuf::from("a.json"),
            source,
        };
        assert_eq!(err.kind(), "decode");
        assert_eq!(err.to_string(), "invalid report JSON in a.json");
    }
}
