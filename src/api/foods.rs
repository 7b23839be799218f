//! Food endpoints (user section)

use crate::api::ApiClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A food record as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calories: i64,
}

/// Payload for creating or updating a food.
#[derive(Debug, Clone, Serialize)]
pub struct FoodInput {
    pub name: String,
    pub calories: i64,
}

impl ApiClient {
    /// `GET /api/user/foods`
    pub async fn list_foods(&self) -> Result<Vec<Food>> {
        self.get_list("/api/user/foods", "foods").await
    }

    /// `POST /api/user/foods` - returns the record with its assigned id.
    pub async fn create_food(&self, input: &FoodInput) -> Result<Food> {
        self.post("/api/user/foods", input).await
    }

    /// `PUT /api/user/foods/:id`
    pub async fn update_food(&self, id: i64, input: &FoodInput) -> Result<Food> {
        self.put(&format!("/api/user/foods/{}", id), input).await
    }

    /// `DELETE /api/user/foods/:id`
    pub async fn delete_food(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/user/foods/{}", id)).await
    }
}
