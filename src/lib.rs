pub mod chat;
pub mod directories;
pub mod i18n;
pub mod integration;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParleyError {
    #[error("Speech capability unavailable: {0}")]
    SpeechUnsupported(String),

    #[error("Speech recognition error: {0}")]
    RecognitionError(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Directory already exists: {0}")]
    DuplicateDirectory(String),

    #[error("Directory path is required")]
    EmptyPath,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for ParleyError {
    fn from(e: std::io::Error) -> Self {
        ParleyError::IOError(e.to_string())
    }
}

impl ParleyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Missing platform capability won't appear on retry
            ParleyError::SpeechUnsupported(_) => false,
            ParleyError::RecognitionError(_) => true,
            ParleyError::SynthesisError(_) => true,
            // Validation failures: the user can correct the input
            ParleyError::DuplicateDirectory(_) => true,
            ParleyError::EmptyPath => true,
            ParleyError::UnsupportedLanguage(_) => true,
            ParleyError::ConfigError(_) => false,
            ParleyError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ParleyError::SpeechUnsupported(_) => {
                "Speech is not supported on this system.".to_string()
            }
            ParleyError::RecognitionError(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            ParleyError::SynthesisError(_) => {
                "Reading aloud failed. The message is still shown as text.".to_string()
            }
            ParleyError::DuplicateDirectory(_) => "Directory already exists".to_string(),
            ParleyError::EmptyPath => "Directory path is required".to_string(),
            ParleyError::UnsupportedLanguage(tag) => {
                format!("Language \"{}\" is not available.", tag)
            }
            ParleyError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            ParleyError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_recoverable() {
        assert!(ParleyError::EmptyPath.is_recoverable());
        assert!(ParleyError::DuplicateDirectory("/tmp".into()).is_recoverable());
        assert!(!ParleyError::SpeechUnsupported("no engine".into()).is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ParleyError::DuplicateDirectory("/a".into()).user_message(),
            "Directory already exists"
        );
        assert_eq!(ParleyError::EmptyPath.to_string(), "Directory path is required");
        assert_eq!(
            ParleyError::UnsupportedLanguage("fr".into()).user_message(),
            "Language \"fr\" is not available."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ParleyError = io.into();
        assert!(matches!(err, ParleyError::IOError(_)));
        assert!(!err.is_recoverable());
    }
}
