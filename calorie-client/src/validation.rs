//! Client-side form validation.
//!
//! Runs before anything is sent; a form that fails here never reaches the
//! gateway.

use std::collections::BTreeMap;

use calorie_common::{LoginRequest, MealRequest, RegisterRequest};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DISH_NAME_TOO_SHORT: &str = "Dish name too short";
pub const SERVINGS_TOO_FEW: &str = "Need at least 0.1 servings";
pub const SERVINGS_TOO_MANY: &str = "Max 50 servings";

pub const MIN_SERVINGS: f64 = 0.1;
pub const MAX_SERVINGS: f64 = 50.0;
const MIN_DISH_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate_meal(request: &MealRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if request.dish_name.trim().chars().count() < MIN_DISH_NAME_CHARS {
        errors.add("dish_name", DISH_NAME_TOO_SHORT);
    }
    if request.servings.is_nan() || request.servings < MIN_SERVINGS {
        errors.add("servings", SERVINGS_TOO_FEW);
    } else if request.servings > MAX_SERVINGS {
        errors.add("servings", SERVINGS_TOO_MANY);
    }
    errors.into_result()
}

pub fn validate_login(request: &LoginRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if !is_valid_email(&request.email) {
        errors.add("email", "Invalid email");
    }
    if request.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.add("password", "Password too short");
    }
    errors.into_result()
}

pub fn validate_register(request: &RegisterRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if request.first_name.trim().is_empty() {
        errors.add("firstName", "First name is required");
    }
    if request.last_name.trim().is_empty() {
        errors.add("lastName", "Last name is required");
    }
    if !is_valid_email(&request.email) {
        errors.add("email", "Invalid email address");
    }
    if request.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.add("password", "Password must be at least 6 characters");
    }
    errors.into_result()
}
