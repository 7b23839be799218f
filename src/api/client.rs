//! Core request plumbing

use crate::auth::SessionStore;
use crate::config::{ApiConfig, Config};
use crate::error::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// The single chokepoint for calls to the remote API.
///
/// Reads the bearer token from the session store at call time, so a login
/// or logout between two calls is always picked up. Never mutates the
/// store itself; callers decide what a 401 means for the session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api: ApiConfig,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, store: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url().to_string(),
            api: config.api.clone(),
            store,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub(crate) fn api_config(&self) -> &ApiConfig {
        &self.api
    }

    /// Issue a request and return the tolerantly-parsed response body.
    ///
    /// 2xx bodies parse as JSON; an empty body is `Null` and a non-JSON
    /// body degrades to a JSON string. Anything else becomes an
    /// [`Error::Api`] carrying the message the backend put in the body,
    /// when it put one there.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.store.read().token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&text, status),
            });
        }

        Ok(parse_body(&text))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.execute(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET a list endpoint, tolerating both bare arrays and wrapped
    /// `{"items": [...]}` / `{"<resource>": [...]}` response shapes.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<Vec<T>> {
        let value = self.execute(Method::GET, path, None).await?;
        list_from_value(value, resource)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let value = self
            .execute(Method::POST, path, Some(serde_json::to_value(body)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let value = self
            .execute(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_message(text: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()))
}

pub(crate) fn list_from_value<T: DeserializeOwned>(value: Value, resource: &str) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items").or_else(|| map.remove(resource)) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_json() {
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_parse_body_empty_is_null() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
    }

    #[test]
    fn test_parse_body_non_json_degrades_to_string() {
        assert_eq!(parse_body("OK"), Value::String("OK".to_string()));
    }

    #[test]
    fn test_error_message_from_body() {
        let msg = error_message(r#"{"message":"Invalid credentials"}"#, StatusCode::UNAUTHORIZED);
        assert_eq!(msg, "Invalid credentials");
    }

    #[test]
    fn test_error_message_fallback_includes_status() {
        let msg = error_message("<html>gateway error</html>", StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "Request failed (502)");
    }

    #[test]
    fn test_list_from_bare_array() {
        let items: Vec<i64> = list_from_value(json!([1, 2, 3]), "items").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_from_wrapped_object() {
        let items: Vec<i64> = list_from_value(json!({"items": [4, 5]}), "foods").unwrap();
        assert_eq!(items, vec![4, 5]);

        let items: Vec<i64> = list_from_value(json!({"foods": [6]}), "foods").unwrap();
        assert_eq!(items, vec![6]);
    }

    #[test]
    fn test_list_from_unexpected_shape_is_empty() {
        let items: Vec<i64> = list_from_value(json!({"count": 3}), "foods").unwrap();
        assert!(items.is_empty());
        let items: Vec<i64> = list_from_value(Value::Null, "foods").unwrap();
        assert!(items.is_empty());
    }
}
