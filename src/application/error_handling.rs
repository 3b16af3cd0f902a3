// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing notices
// - Provides consistent error format for views
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where views send the user when a favorite action needs a sign-in
pub const LOGIN_ROUTE: &str = "/login";

pub const AUTH_REQUIRED_MESSAGE: &str = "You need to be logged in to add to favorite!";
pub const TRY_AGAIN_MESSAGE: &str = "Something went wrong. Please try again.";
pub const BAD_MOVIE_MESSAGE: &str = "Something went wrong with the movie data.";

/// Standard error response for views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// Route the view should navigate to, if any
    pub redirect: Option<String>,
}

/// Error categories for views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No signed-in user (401)
    AuthRequired,

    /// Invalid input/validation error (400)
    Validation,

    /// Same action already running (409)
    Conflict,

    /// Favorites store error (500)
    Database,

    /// Catalog or other remote service error (502)
    ExternalService,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details: None,
            redirect: None,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::AuthRequired => Self {
                redirect: Some(LOGIN_ROUTE.to_string()),
                ..Self::new(ErrorType::AuthRequired, AUTH_REQUIRED_MESSAGE)
            },

            AppError::InvalidInput(reason) => {
                log::warn!("Rejected input: {}", reason);
                Self {
                    details: Some(reason),
                    ..Self::new(ErrorType::Validation, BAD_MOVIE_MESSAGE)
                }
            }

            AppError::Domain(domain_error) => Self {
                details: Some(domain_error.to_string()),
                ..Self::new(ErrorType::Validation, "Validation failed")
            },

            AppError::ToggleInFlight(movie_id) => {
                log::debug!("Toggle for {} already running", movie_id);
                Self::new(ErrorType::Conflict, "Please wait, still saving your last change.")
            }

            AppError::ViewUnmounted => {
                log::debug!("Action on an unmounted view ignored");
                Self::new(ErrorType::Conflict, "This page has been closed.")
            }

            AppError::DataWrite(reason) => {
                log::error!("Favorites write error: {}", reason);
                Self::new(ErrorType::Database, TRY_AGAIN_MESSAGE)
            }

            AppError::DataRead(reason) => {
                log::error!("Favorites read error: {}", reason);
                Self::new(ErrorType::Database, TRY_AGAIN_MESSAGE)
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self {
                    details: Some("Check logs for details".to_string()),
                    ..Self::new(ErrorType::Database, "Database operation failed")
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed")
            }

            AppError::Catalog(reason) => {
                log::error!("Catalog error: {}", reason);
                Self::new(ErrorType::ExternalService, "Could not load movies. Please try again.")
            }

            AppError::Http(http_error) => {
                log::error!("HTTP error: {}", http_error);
                Self::new(ErrorType::ExternalService, "External service error")
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed")
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, "File system operation failed")
            }

            AppError::Config(reason) => {
                log::error!("Configuration error: {}", reason);
                Self::new(ErrorType::Internal, "The application is not configured correctly")
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, TRY_AGAIN_MESSAGE)
            }
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Result type of every command
pub type CommandResult<T> = Result<T, ErrorResponse>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;

    #[test]
    fn test_auth_required_redirects_to_login() {
        let error = ErrorResponse::from_app_error(AppError::AuthRequired);
        assert_eq!(error.error_type, ErrorType::AuthRequired);
        assert_eq!(error.message, AUTH_REQUIRED_MESSAGE);
        assert_eq!(error.redirect.as_deref(), Some("/login"));
    }

    #[test]
    fn test_write_failure_hides_details() {
        let error = ErrorResponse::from(AppError::DataWrite("permission denied on users/u1".to_string()));
        assert_eq!(error.error_type, ErrorType::Database);
        assert_eq!(error.message, TRY_AGAIN_MESSAGE);
        assert!(error.details.is_none());
        assert!(error.redirect.is_none());
    }

    #[test]
    fn test_invalid_input_and_conflict() {
        let error = ErrorResponse::from(AppError::InvalidInput("movie id missing".to_string()));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, BAD_MOVIE_MESSAGE);

        let error = ErrorResponse::from(AppError::ToggleInFlight(MovieId(42)));
        assert_eq!(error.error_type, ErrorType::Conflict);

        let error = ErrorResponse::from(AppError::ViewUnmounted);
        assert_eq!(error.error_type, ErrorType::Conflict);
        assert!(error.redirect.is_none());
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from(AppError::AuthRequired);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("auth_required"));
        assert!(json.contains("\"redirect\":\"/login\""));
    }
}
