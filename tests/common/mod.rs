#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use fake::Fake;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use http_body_util::BodyExt;
use microtrack::microtrack_config::{JwtConfig, PasswordConfig};
use microtrack::router::init_router;
use microtrack::state::AppState;
use microtrack::store::AccountStore;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 24 * 60 * 60,
    }
}

/// Lowest bcrypt cost, to keep tests fast.
pub fn test_password_config() -> PasswordConfig {
    PasswordConfig { bcrypt_cost: 4 }
}

pub fn setup_state() -> AppState {
    AppState::in_memory(&test_jwt_config(), test_password_config())
}

pub fn setup_test_app(state: AppState) -> Router {
    init_router(state)
}

pub struct TestAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl TestAccount {
    pub fn fake() -> Self {
        let suffix = &uuid::Uuid::new_v4().simple().to_string()[..8];
        let username: String = Username().fake();
        let email: String = FreeEmail().fake();
        Self {
            username: format!("{}_{}", username, suffix),
            email: format!("{}_{}", suffix, email),
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            password: "testpass123".to_string(),
        }
    }

    pub fn signup_body(&self) -> Value {
        json!({
            "username": self.username,
            "email": self.email,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "password": self.password,
        })
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn signup(app: &Router, account: &TestAccount) {
    let (status, body) = send(app, json_request("POST", "/signup", None, Some(account.signup_body()))).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
}

pub async fn login(app: &Router, account: &TestAccount) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/login",
            None,
            Some(json!({ "username": account.username, "password": account.password })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body
}

/// Signs up a fresh account, promotes it directly in the store and logs in.
pub async fn admin_token(app: &Router, state: &AppState) -> String {
    let account = TestAccount::fake();
    signup(app, &account).await;
    assert!(
        state
            .accounts
            .set_role(&account.username, microtrack::microtrack_models::Role::Admin)
            .await
            .unwrap()
    );
    login(app, &account).await["token"].as_str().unwrap().to_string()
}

pub async fn user_token(app: &Router) -> String {
    let account = TestAccount::fake();
    signup(app, &account).await;
    login(app, &account).await["token"].as_str().unwrap().to_string()
}

pub fn plant_body(name: &str, growth_days: i32) -> Value {
    json!({
        "name": name,
        "scientific_name": "Ocimum basilicum",
        "seeding_date": "2024-01-01",
        "growth_days": growth_days,
        "description": "test plant",
        "height": 12.5,
        "leaf_color": "green",
        "floor": "1",
        "humidity": 60.0,
        "temperature": 22.5,
        "growth_stage": "seedling",
    })
}

pub async fn create_plant(app: &Router, token: &str, body: Value) -> Value {
    let (status, body) = send(app, json_request("POST", "/plants", Some(token), Some(body))).await;
    assert_eq!(status, StatusCode::CREATED, "create plant failed: {}", body);
    body
}
