use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API returned HTTP {status} for page {page}")]
    HttpStatusError { status: u16, page: u32 },

    #[error("Malformed response body for page {page}: {message}")]
    MalformedResponseError { page: u32, message: String },

    #[error("Field '{field}' missing from response for page {page}")]
    MissingFieldError { page: u32, field: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid vacancy {field} '{value}': {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Response,
    Storage,
    Configuration,
    Validation,
}

impl VacancyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VacancyError::ApiError(_) | VacancyError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            VacancyError::MalformedResponseError { .. } | VacancyError::MissingFieldError { .. } => {
                ErrorCategory::Response
            }
            VacancyError::IoError(_) | VacancyError::SerializationError(_) => ErrorCategory::Storage,
            VacancyError::ConfigValidationError { .. }
            | VacancyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            VacancyError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn validation(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        VacancyError::ValidationError {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VacancyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_by_variant() {
        let status = VacancyError::HttpStatusError { status: 404, page: 0 };
        assert_eq!(status.category(), ErrorCategory::Network);
        assert_eq!(status.to_string(), "API returned HTTP 404 for page 0");

        let missing = VacancyError::MissingFieldError {
            page: 3,
            field: "items".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Response);

        let io = VacancyError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.category(), ErrorCategory::Storage);

        let invalid = VacancyError::validation("name", "", "name cannot be empty");
        assert_eq!(invalid.category(), ErrorCategory::Validation);
    }
}
