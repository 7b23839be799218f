//! Profile endpoints (user section)

use crate::api::ApiClient;
use crate::auth::User;
use crate::error::Result;
use serde::Serialize;

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiClient {
    /// `PUT /api/user/profile` - returns the updated user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.put("/api/user/profile", update).await
    }
}
