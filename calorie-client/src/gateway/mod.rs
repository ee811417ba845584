//! Gateway to the calorie REST service.
//!
//! This module defines the `CalorieApi` trait used by the form controllers
//! and its HTTP implementation, which attaches the session's bearer token
//! to every request and signs the user out on any 401.

mod classify;
mod client;

pub use classify::{classify, Endpoint, LOOKUP_FAILED};
pub use client::ApiClient;

use async_trait::async_trait;
use calorie_common::{AuthResponse, LoginRequest, MealRequest, MealResponse, RegisterRequest};

use crate::error::ApiResult;

/// Remote operations offered by the calorie service.
///
/// Futures are not `Send`: the client shares session state through
/// `Rc<RefCell<_>>` and runs on a single thread.
#[async_trait(?Send)]
pub trait CalorieApi {
    /// Create an account. Fails with `Validation` when the payload is rejected.
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    /// Exchange credentials for a token. Fails with `Auth` on bad credentials.
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// Nutrition facts for `servings` of a dish. Fails with `NotFound` when
    /// the dish has no match.
    async fn lookup(&self, request: &MealRequest) -> ApiResult<MealResponse>;
}
