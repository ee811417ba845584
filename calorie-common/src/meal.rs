//! Calorie lookup types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /get-calories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRequest {
    pub dish_name: String,
    pub servings: f64,
}

/// Macronutrient amounts in grams.
///
/// Older service builds omit the `_g` suffix, so the bare names are
/// accepted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientBreakdown {
    #[serde(default, alias = "protein")]
    pub protein_g: f64,
    #[serde(default, alias = "fat")]
    pub fat_g: f64,
    #[serde(default, alias = "carbohydrates")]
    pub carbohydrates_g: f64,
    #[serde(default, alias = "fiber")]
    pub fiber_g: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macronutrients {
    #[serde(default)]
    pub per_serving: NutrientBreakdown,
    #[serde(default)]
    pub total: NutrientBreakdown,
}

/// Nutrition service response for one dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealResponse {
    pub dish_name: String,
    pub servings: f64,
    #[serde(default)]
    pub serving_size_g: Option<f64>,
    pub calories_per_serving: f64,
    pub total_calories: f64,
    #[serde(default)]
    pub macronutrients: Option<Macronutrients>,
    #[serde(default)]
    pub source: String,
}

/// A completed lookup as kept in the client's history.
///
/// `id` and `timestamp` are assigned on the client when the result is
/// created; the service never returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub id: String,
    pub dish_name: String,
    pub servings: f64,
    pub calories_per_serving: f64,
    pub total_calories: f64,
    #[serde(default)]
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl LookupResult {
    /// Stamp a service response with a fresh id and the current time.
    pub fn from_response(response: &MealResponse) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            dish_name: response.dish_name.clone(),
            servings: response.servings,
            calories_per_serving: response.calories_per_serving,
            total_calories: response.total_calories,
            source: response.source.clone(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_json() -> &'static str {
        r#"{
            "dish_name": "Apple, raw, with skin",
            "servings": 2,
            "serving_size_g": 182,
            "calories_per_serving": 52,
            "total_calories": 104,
            "macronutrients": {
                "per_serving": {"protein_g": 0.3, "fat_g": 0.2, "carbohydrates_g": 13.8, "fiber_g": 2.4},
                "total": {"protein_g": 0.6, "fat_g": 0.4, "carbohydrates_g": 27.6, "fiber_g": 4.8}
            },
            "source": "USDA FoodData Central"
        }"#
    }

    #[test]
    fn test_meal_response_parsing() {
        let response: MealResponse = serde_json::from_str(apple_json()).unwrap();
        assert_eq!(response.total_calories, 104.0);
        assert_eq!(response.serving_size_g, Some(182.0));
        let macros = response.macronutrients.unwrap();
        assert_eq!(macros.total.carbohydrates_g, 27.6);
    }

    #[test]
    fn test_macronutrient_aliases() {
        let json = r#"{"per_serving": {"protein": 0.3, "fat": 0.2}, "total": {"fiber": 4.8}}"#;
        let macros: Macronutrients = serde_json::from_str(json).unwrap();
        assert_eq!(macros.per_serving.protein_g, 0.3);
        assert_eq!(macros.per_serving.fat_g, 0.2);
        assert_eq!(macros.total.fiber_g, 4.8);
        assert_eq!(macros.total.protein_g, 0.0);
    }

    #[test]
    fn test_meal_response_without_source() {
        let json = r#"{"dish_name": "Toast", "servings": 1, "calories_per_serving": 80, "total_calories": 80}"#;
        let response: MealResponse = serde_json::from_str(json).unwrap();
        assert!(response.source.is_empty());
        assert!(response.macronutrients.is_none());
    }

    #[test]
    fn test_lookup_result_gets_unique_ids() {
        let response: MealResponse = serde_json::from_str(apple_json()).unwrap();
        let first = LookupResult::from_response(&response);
        let second = LookupResult::from_response(&response);

        assert_ne!(first.id, second.id);
        assert_eq!(first.total_calories, 104.0);
        assert_eq!(first.servings, 2.0);
        assert_eq!(first.source, "USDA FoodData Central");
    }
}
