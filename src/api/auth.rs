//! Authentication endpoints

use crate::api::ApiClient;
use crate::auth::{AuthResult, Credentials, Registration, User};
use crate::error::Result;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// `POST /api/auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResult> {
        self.post("/api/auth/login", credentials).await
    }

    /// `POST /api/auth/register`
    ///
    /// Backends differ on the response: some wrap the created user in a
    /// `user` field, some return it bare. Both shapes are accepted.
    pub async fn register(&self, registration: &Registration) -> Result<User> {
        let value: Value = self
            .execute(
                Method::POST,
                "/api/auth/register",
                Some(serde_json::to_value(registration)?),
            )
            .await?;
        let user = value.get("user").cloned().unwrap_or(value);
        Ok(serde_json::from_value(user)?)
    }

    /// GET the current user. The path varies between deployments and is
    /// taken from configuration.
    pub async fn me(&self) -> Result<User> {
        let path = self.api_config().me_path.clone();
        self.get(&path).await
    }

    /// GET the user dashboard summary. Shape is backend-defined, so the
    /// raw JSON is handed to the view.
    pub async fn dashboard(&self) -> Result<Value> {
        let path = self.api_config().dashboard_path.clone();
        self.get(&path).await
    }
}
