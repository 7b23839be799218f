//! Meal endpoints (user section)

use crate::api::ApiClient;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub protein: f64,
}

/// Payload for logging a meal.
#[derive(Debug, Clone, Serialize)]
pub struct MealInput {
    pub name: String,
    pub calories: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl ApiClient {
    /// `GET /api/meals`
    pub async fn list_meals(&self) -> Result<Vec<Meal>> {
        self.get_list("/api/meals", "meals").await
    }

    /// `POST /api/meals`
    pub async fn create_meal(&self, input: &MealInput) -> Result<Meal> {
        self.post("/api/meals", input).await
    }

    /// `DELETE /api/meals/:id`
    pub async fn delete_meal(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/meals/{}", id)).await
    }
}
