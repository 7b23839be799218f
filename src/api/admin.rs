//! Admin-only endpoints

use crate::api::{ApiClient, Food, FoodInput, Meal};
use crate::auth::{Role, User};
use crate::error::Result;
use chrono::NaiveDate;
use serde_json::{json, Value};

impl ApiClient {
    /// `GET /api/admin/users`
    pub async fn admin_list_users(&self) -> Result<Vec<User>> {
        self.get_list("/api/admin/users", "users").await
    }

    /// `PUT /api/admin/users/:id/role`
    pub async fn admin_set_user_role(&self, id: i64, role: Role) -> Result<User> {
        self.put(
            &format!("/api/admin/users/{}/role", id),
            &json!({ "role": role.as_str() }),
        )
        .await
    }

    /// `DELETE /api/admin/users/:id`
    pub async fn admin_delete_user(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/admin/users/{}", id)).await
    }

    /// `GET /api/admin/foods`
    pub async fn admin_list_foods(&self) -> Result<Vec<Food>> {
        self.get_list("/api/admin/foods", "foods").await
    }

    /// `POST /api/admin/foods`
    pub async fn admin_create_food(&self, input: &FoodInput) -> Result<Food> {
        self.post("/api/admin/foods", input).await
    }

    /// `PUT /api/admin/foods/:id`
    pub async fn admin_update_food(&self, id: i64, input: &FoodInput) -> Result<Food> {
        self.put(&format!("/api/admin/foods/{}", id), input).await
    }

    /// `DELETE /api/admin/foods/:id`
    pub async fn admin_delete_food(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/admin/foods/{}", id)).await
    }

    /// `GET /api/admin/meals`
    pub async fn admin_list_meals(&self) -> Result<Vec<Meal>> {
        self.get_list("/api/admin/meals", "meals").await
    }

    /// `DELETE /api/admin/meals/:id`
    pub async fn admin_delete_meal(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/admin/meals/{}", id)).await
    }

    /// `GET /api/admin/reports/daily[?date=YYYY-MM-DD]`
    pub async fn admin_report_daily(&self, date: Option<NaiveDate>) -> Result<Value> {
        let path = match date {
            Some(date) => format!("/api/admin/reports/daily?date={}", date.format("%Y-%m-%d")),
            None => "/api/admin/reports/daily".to_string(),
        };
        self.get(&path).await
    }

    /// `GET /api/admin/reports/monthly[?month=YYYY-MM]`
    ///
    /// `month` has already been validated as `YYYY-MM` by the caller.
    pub async fn admin_report_monthly(&self, month: Option<&str>) -> Result<Value> {
        let path = match month {
            Some(month) => format!("/api/admin/reports/monthly?month={}", month),
            None => "/api/admin/reports/monthly".to_string(),
        };
        self.get(&path).await
    }
}
