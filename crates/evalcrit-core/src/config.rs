//! Editor configuration.

/// Separator the source form joins row errors with (`Array.join()` default).
pub const DEFAULT_ERROR_SEPARATOR: &str = ",";

/// Configuration for [`crate::editor::CriteriaEditor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Text placed between `"{index}. {message}"` entries of the aggregate
    /// error (default: `","`)
    pub error_separator: String,
    /// Refuse to submit criteria with an empty question (default: false)
    pub reject_empty_questions: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            error_separator: DEFAULT_ERROR_SEPARATOR.to_string(),
            reject_empty_questions: false,
        }
    }
}

impl EditorConfig {
    /// Set the aggregate error separator
    pub fn with_error_separator(mut self, separator: impl Into<String>) -> Self {
        self.error_separator = separator.into();
        self
    }

    /// Set whether empty questions block submission
    pub fn with_reject_empty_questions(mut self, reject: bool) -> Self {
        self.reject_empty_questions = reject;
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - EVALCRIT_ERROR_SEPARATOR (optional, default: ",")
    /// - EVALCRIT_REJECT_EMPTY_QUESTIONS (optional, default: "false")
    pub fn from_env() -> Self {
        let error_separator = std::env::var("EVALCRIT_ERROR_SEPARATOR")
            .unwrap_or_else(|_| DEFAULT_ERROR_SEPARATOR.to_string());
        let reject_empty_questions = std::env::var("EVALCRIT_REJECT_EMPTY_QUESTIONS")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            error_separator,
            reject_empty_questions,
        }
    }
}
