//! Mapping of HTTP failures onto `ApiError`.

use reqwest::StatusCode;

use crate::error::ApiError;

pub const DISH_NOT_FOUND: &str = "Dish not found in database";
pub const SERVER_ERROR: &str = "Server error - try again later";
pub const LOOKUP_FAILED: &str = "Could not find calorie info";
pub const SESSION_EXPIRED: &str = "Your session has expired, please sign in again";
pub const BAD_CREDENTIALS: &str = "Invalid email or password";
pub const REGISTRATION_REJECTED: &str = "Registration was rejected";
pub const ACCESS_DENIED: &str = "Access denied";

/// Remote endpoints, each with its own failure vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Lookup,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Register => "/auth/register",
            Endpoint::Login => "/auth/login",
            Endpoint::Lookup => "/get-calories",
        }
    }

    /// Whether a 401 here means an expired session rather than bad credentials.
    pub fn is_authenticated(self) -> bool {
        matches!(self, Endpoint::Lookup)
    }
}

/// Translate a non-success response into the error taxonomy.
///
/// `message` is the text extracted from the error body, if any; otherwise
/// a per-kind default is used.
pub fn classify(endpoint: Endpoint, status: StatusCode, message: Option<String>) -> ApiError {
    let or = |default: &str| message.clone().unwrap_or_else(|| default.to_string());

    if status.is_server_error() {
        return ApiError::Server {
            status: status.as_u16(),
            message: or(SERVER_ERROR),
        };
    }

    match (endpoint, status.as_u16()) {
        (_, 401) if endpoint.is_authenticated() => {
            ApiError::AuthorizationExpired(or(SESSION_EXPIRED))
        }
        (_, 401) => ApiError::Auth(or(BAD_CREDENTIALS)),
        (_, 403) => ApiError::Auth(or(ACCESS_DENIED)),

        (Endpoint::Login, 400 | 422) => ApiError::Validation(or(BAD_CREDENTIALS)),
        (Endpoint::Login, _) => ApiError::Auth(or(BAD_CREDENTIALS)),

        (Endpoint::Register, _) => ApiError::Validation(or(REGISTRATION_REJECTED)),

        (Endpoint::Lookup, 404) => ApiError::NotFound(or(DISH_NOT_FOUND)),
        (Endpoint::Lookup, _) => ApiError::Validation(or(LOOKUP_FAILED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_on_every_endpoint() {
        for endpoint in [Endpoint::Register, Endpoint::Login, Endpoint::Lookup] {
            let err = classify(endpoint, StatusCode::BAD_GATEWAY, None);
            assert_eq!(
                err,
                ApiError::Server {
                    status: 502,
                    message: SERVER_ERROR.to_string()
                }
            );
        }
    }

    #[test]
    fn test_unauthorized_depends_on_endpoint() {
        assert!(matches!(
            classify(Endpoint::Lookup, StatusCode::UNAUTHORIZED, None),
            ApiError::AuthorizationExpired(_)
        ));
        assert_eq!(
            classify(Endpoint::Login, StatusCode::UNAUTHORIZED, None),
            ApiError::Auth(BAD_CREDENTIALS.to_string())
        );
    }

    #[test]
    fn test_lookup_not_found_default_message() {
        assert_eq!(
            classify(Endpoint::Lookup, StatusCode::NOT_FOUND, None),
            ApiError::NotFound(DISH_NOT_FOUND.to_string())
        );
    }

    #[test]
    fn test_body_message_overrides_default() {
        assert_eq!(
            classify(
                Endpoint::Register,
                StatusCode::CONFLICT,
                Some("Email already registered".to_string())
            ),
            ApiError::Validation("Email already registered".to_string())
        );
    }

    #[test]
    fn test_lookup_bad_request_is_validation() {
        assert!(matches!(
            classify(Endpoint::Lookup, StatusCode::BAD_REQUEST, None),
            ApiError::Validation(_)
        ));
    }
}
