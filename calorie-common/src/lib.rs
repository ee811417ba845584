//! Calorie Tracker Common Types
//!
//! Shared types used by the client core and anything else that speaks to
//! the calorie service.

pub mod auth;
pub mod error;
pub mod meal;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, User};
pub use error::ErrorBody;
pub use meal::{LookupResult, Macronutrients, MealRequest, MealResponse, NutrientBreakdown};
