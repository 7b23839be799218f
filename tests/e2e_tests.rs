//! End-to-end flows against an in-process fake backend
//!
//! These walk the same path the screens do: guard, gateway call, local
//! list splice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use foodtrack::api::{ApiClient, FoodInput};
use foodtrack::auth::{
    check, Credentials, Destination, GuardDecision, Role, Section, SessionStore,
};
use foodtrack::cli::state;
use foodtrack::Config;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{}", addr)
}

fn test_client(base_url: &str, dir: &TempDir) -> (ApiClient, SessionStore) {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.session.dir = dir.path().join("session");

    let store = SessionStore::new(config.session.dir.clone());
    let client = ApiClient::new(&config, store.clone());
    (client, store)
}

async fn login_handler(Json(body): Json<Value>) -> axum::response::Response {
    if body["email"] == "a@b.com" && body["password"] == "x" {
        Json(json!({
            "token": "T",
            "user": {"id": 1, "name": "Ada", "email": "a@b.com", "role": "ADMIN"}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response()
    }
}

/// Scenario: logging in as an admin fills the store and routes to the
/// admin home.
#[tokio::test]
async fn test_login_populates_session_and_routes_to_admin_home() {
    let dir = TempDir::new().unwrap();
    let base = spawn_backend(Router::new().route("/api/auth/login", post(login_handler))).await;
    let (client, store) = test_client(&base, &dir);

    let auth = client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();
    store.write(&auth.token, &auth.user).unwrap();

    let snapshot = store.read();
    assert_eq!(snapshot.token.as_deref(), Some("T"));
    assert_eq!(snapshot.role.as_deref(), Some("ADMIN"));

    // The admin session entering the user home is sent to the admin home
    assert_eq!(
        check(&snapshot, Section::User),
        GuardDecision::Redirect(Destination::AdminHome)
    );
    assert_eq!(check(&snapshot, Section::Admin), GuardDecision::Allow);
}

#[tokio::test]
async fn test_login_failure_leaves_store_empty() {
    let dir = TempDir::new().unwrap();
    let base = spawn_backend(Router::new().route("/api/auth/login", post(login_handler))).await;
    let (client, store) = test_client(&base, &dir);

    let err = client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid credentials");

    assert!(!store.read().is_authenticated());
}

/// Scenario: a 204 delete removes exactly the matching row from the
/// list already on screen.
#[tokio::test]
async fn test_delete_removes_exactly_one_item() {
    let dir = TempDir::new().unwrap();
    let router = Router::new()
        .route(
            "/api/user/foods",
            get(|| async {
                Json(json!([
                    {"id": 5, "name": "Rice", "calories": 130},
                    {"id": 7, "name": "Egg", "calories": 155},
                    {"id": 9, "name": "Oats", "calories": 389},
                ]))
            }),
        )
        .route(
            "/api/user/foods/{id}",
            delete(|axum::extract::Path(id): axum::extract::Path<i64>| async move {
                assert_eq!(id, 7);
                StatusCode::NO_CONTENT
            }),
        );
    let base = spawn_backend(router).await;
    let (client, _store) = test_client(&base, &dir);

    let mut foods = client.list_foods().await.unwrap();
    client.delete_food(7).await.unwrap();
    assert!(state::remove(&mut foods, 7));

    let ids: Vec<i64> = foods.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![5, 9]);
    assert_eq!(foods[0].name, "Rice");
    assert_eq!(foods[1].name, "Oats");
}

/// Scenario: a create appends the server-assigned record without
/// re-fetching the collection.
#[tokio::test]
async fn test_create_appends_without_refetch() {
    let dir = TempDir::new().unwrap();
    let list_hits = Arc::new(AtomicUsize::new(0));
    let hits = list_hits.clone();

    let router = Router::new().route(
        "/api/user/foods",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!([{"id": 1, "name": "Rice", "calories": 130}]))
            }
        })
        .post(|Json(body): Json<Value>| async move {
            Json(json!({
                "id": 101,
                "name": body["name"],
                "calories": body["calories"],
            }))
        }),
    );
    let base = spawn_backend(router).await;
    let (client, _store) = test_client(&base, &dir);

    let mut foods = client.list_foods().await.unwrap();
    let created = client
        .create_food(&FoodInput {
            name: "Apple".to_string(),
            calories: 52,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 101);
    state::upsert(&mut foods, created);

    let ids: Vec<i64> = foods.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 101]);
    assert_eq!(foods[1].name, "Apple");
    assert_eq!(foods[1].calories, 52);

    // The collection was fetched exactly once
    assert_eq!(list_hits.load(Ordering::SeqCst), 1);
}

/// The stored token from a login flows into subsequent authenticated
/// calls without any explicit plumbing.
#[tokio::test]
async fn test_token_flows_from_login_to_next_call() {
    let dir = TempDir::new().unwrap();
    let router = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route(
            "/api/user/foods",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer T") => Json(json!([])).into_response(),
                    _ => (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Missing token"})),
                    )
                        .into_response(),
                }
            }),
        );
    let base = spawn_backend(router).await;
    let (client, store) = test_client(&base, &dir);

    // Unauthenticated call is rejected by the backend
    assert!(client.list_foods().await.is_err());

    let auth = client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();
    store.write(&auth.token, &auth.user).unwrap();

    let foods = client.list_foods().await.unwrap();
    assert!(foods.is_empty());
}

/// Logging out then clearing again is harmless, and the guard goes back
/// to demanding a login.
#[tokio::test]
async fn test_logout_then_guard_demands_login() {
    let dir = TempDir::new().unwrap();
    let base = spawn_backend(Router::new().route("/api/auth/login", post(login_handler))).await;
    let (client, store) = test_client(&base, &dir);

    let auth = client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();
    store.write(&auth.token, &auth.user).unwrap();
    assert_eq!(store.read().role(), Role::Admin);

    store.clear().unwrap();
    store.clear().unwrap();

    for section in [Section::User, Section::Admin] {
        assert_eq!(
            check(&store.read(), section),
            GuardDecision::Redirect(Destination::Login)
        );
    }
}
