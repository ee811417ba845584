//! HTTP client for the calorie service.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use calorie_common::{
    AuthResponse, ErrorBody, LoginRequest, MealRequest, MealResponse, RegisterRequest,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::navigation::{Router, View};
use crate::session::SharedSession;

use super::{classify, CalorieApi, Endpoint};

/// Calorie service client.
///
/// Reads the bearer token from the shared session on every request and
/// clears that session when the service answers 401.
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
    session: SharedSession,
    router: Rc<Router>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        session: SharedSession,
        router: Rc<Router>,
    ) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            session,
            router,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, endpoint: Endpoint, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint.path());
        // Copy the token out so no borrow is held across the await.
        let token = self.session.borrow().token().map(str::to_string);

        let mut request = self.http_client.post(&url).json(body);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(url = %url, authenticated = token.is_some(), "Sending request");

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if status.is_success() {
            // The timeout also covers the body; a stalled body is a transport failure.
            let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
            return serde_json::from_slice::<R>(&body).map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Malformed response body");
                ApiError::Server {
                    status: status.as_u16(),
                    message: "Unexpected response from server".to_string(),
                }
            });
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|body| body.message());

        tracing::warn!(
            url = %url,
            status = status.as_u16(),
            body = %raw,
            "API error"
        );

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        Err(classify(endpoint, status, message))
    }

    /// Drop the session and show the sign-in view, unless an auth view is
    /// already up.
    fn handle_unauthorized(&self) {
        self.session.borrow_mut().logout();
        let current = self.router.current();
        if !current.is_auth_view() {
            self.router.navigate(View::Login);
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        tracing::warn!(error = %err, "Request failed before a response arrived");
        if err.is_timeout() {
            ApiError::Network(format!(
                "Request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if err.is_connect() {
            ApiError::Network("Could not reach the calorie service".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[async_trait(?Send)]
impl CalorieApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.post(Endpoint::Register, request).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.post(Endpoint::Login, request).await
    }

    async fn lookup(&self, request: &MealRequest) -> ApiResult<MealResponse> {
        if request.dish_name.trim().is_empty() {
            return Err(ApiError::Validation("Dish name is required".to_string()));
        }
        if !(request.servings.is_finite() && request.servings > 0.0) {
            return Err(ApiError::Validation(
                "Servings must be greater than zero".to_string(),
            ));
        }
        self.post(Endpoint::Lookup, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use crate::storage::PersistedStore;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 10,
        };
        ApiClient::new(
            &config,
            SessionState::shared(PersistedStore::in_memory()),
            Rc::new(Router::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_normalization() {
        let client = client("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_lookup_rejects_non_positive_servings_locally() {
        // Nothing listens here; a request would fail with Network instead.
        let client = client("http://127.0.0.1:9");
        for servings in [0.0, -1.0, f64::NAN] {
            let err = client
                .lookup(&MealRequest {
                    dish_name: "apple".to_string(),
                    servings,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{servings}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_lookup_rejects_blank_dish_locally() {
        let client = client("http://127.0.0.1:9");
        let err = client
            .lookup(&MealRequest {
                dish_name: "   ".to_string(),
                servings: 1.0,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Validation("Dish name is required".to_string()));
    }
}
