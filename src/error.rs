use thiserror::Error;

/// Errors surfaced by the show pipeline
#[derive(Debug, Error)]
pub enum ShowError {
    /// Date or time token that cannot be resolved to an instant
    #[error("Invalid date format: {input} ({reason})")]
    InvalidDateFormat { input: String, reason: String },

    /// Timeout, connection failure or non-2xx status from upstream
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered, but not in the expected shape
    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),

    /// Required setting absent when the pipeline ran
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(&'static str),
}

impl ShowError {
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ShowError::InvalidDateFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        ShowError::MalformedUpstream(msg.into())
    }
}

pub type ShowResult<T> = Result<T, ShowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_carries_input() {
        let err = ShowError::invalid_date("übermorgen | 20:15", "unknown date word");
        let msg = err.to_string();
        assert!(msg.contains("übermorgen | 20:15"));
        assert!(msg.contains("unknown date word"));
    }

    #[test]
    fn test_configuration_missing_names_variable() {
        let err = ShowError::ConfigurationMissing("API_URL");
        assert_eq!(err.to_string(), "Configuration missing: API_URL");
    }
}
