//! Error types for calls to the calorie service.

/// Failure of a remote call, already translated into a user-facing
/// message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Malformed input; fixable by the user.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials rejected by login/registration.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Timeout or transport failure, no response received.
    #[error("Network error: {0}")]
    Network(String),

    /// 401 on an authenticated call. The session has already been cleared.
    #[error("Authorization expired: {0}")]
    AuthorizationExpired(String),
}

impl ApiError {
    /// Message suitable for a notification, without the kind prefix.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Auth(msg)
            | ApiError::NotFound(msg)
            | ApiError::Network(msg)
            | ApiError::AuthorizationExpired(msg) => msg,
            ApiError::Server { message, .. } => message,
        }
    }

    /// HTTP status the error kind pins down, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::AuthorizationExpired(_) => Some(401),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
