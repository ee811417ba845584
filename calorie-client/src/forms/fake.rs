//! Scripted `CalorieApi` for controller tests.

use std::cell::RefCell;

use async_trait::async_trait;
use calorie_common::{
    AuthResponse, LoginRequest, MealRequest, MealResponse, RegisterRequest, User,
};

use crate::error::{ApiError, ApiResult};
use crate::gateway::CalorieApi;

pub struct FakeApi {
    pub lookup_response: RefCell<Option<ApiResult<MealResponse>>>,
    pub auth_response: RefCell<Option<ApiResult<AuthResponse>>>,
    pub lookups: RefCell<Vec<MealRequest>>,
    pub logins: RefCell<Vec<LoginRequest>>,
    pub registrations: RefCell<Vec<RegisterRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            lookup_response: RefCell::new(None),
            auth_response: RefCell::new(None),
            lookups: RefCell::new(Vec::new()),
            logins: RefCell::new(Vec::new()),
            registrations: RefCell::new(Vec::new()),
        }
    }

    pub fn with_lookup(response: ApiResult<MealResponse>) -> Self {
        let api = Self::new();
        *api.lookup_response.borrow_mut() = Some(response);
        api
    }

    pub fn with_auth(response: ApiResult<AuthResponse>) -> Self {
        let api = Self::new();
        *api.auth_response.borrow_mut() = Some(response);
        api
    }

    fn next<T: Clone>(slot: &RefCell<Option<ApiResult<T>>>) -> ApiResult<T> {
        slot.borrow()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

#[async_trait(?Send)]
impl CalorieApi for FakeApi {
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.registrations.borrow_mut().push(request.clone());
        tokio::task::yield_now().await;
        Self::next(&self.auth_response)
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.logins.borrow_mut().push(request.clone());
        tokio::task::yield_now().await;
        Self::next(&self.auth_response)
    }

    async fn lookup(&self, request: &MealRequest) -> ApiResult<MealResponse> {
        self.lookups.borrow_mut().push(request.clone());
        tokio::task::yield_now().await;
        Self::next(&self.lookup_response)
    }
}

pub fn apple_response() -> MealResponse {
    serde_json::from_value(serde_json::json!({
        "dish_name": "Apple, raw, with skin",
        "servings": 2,
        "serving_size_g": 182,
        "calories_per_serving": 52,
        "total_calories": 104,
        "macronutrients": {
            "per_serving": {"protein": 0.3, "fat": 0.2, "carbohydrates": 13.8, "fiber": 2.4},
            "total": {"protein": 0.6, "fat": 0.4, "carbohydrates": 27.6, "fiber": 4.8}
        },
        "source": "USDA FoodData Central"
    }))
    .unwrap()
}

pub fn test_user() -> User {
    User {
        id: "u-1".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test@example.com".to_string(),
    }
}
