mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::TestApp;
use pos_server::auth::{JwtConfig, JwtService};
use serde_json::json;
use shared::Role;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let t = TestApp::new().await;

    let (status, body) = t.send(get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "BuffetPOS is running");

    let (status, body) = t.send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let t = TestApp::new().await;
    let response = tower::ServiceExt::oneshot(t.app.clone(), get("/health"))
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_missing_credential() {
    let t = TestApp::new().await;
    let (status, body) = t.send(get("/manage/tables")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_malformed_authorization_is_unauthenticated_not_forbidden() {
    let t = TestApp::new().await;
    let token = t.employee_token();

    for header_value in [
        token.clone(),
        format!("Basic {token}"),
        format!("bearer {token}"),
        "Bearer ".to_string(),
    ] {
        let (status, body) = t.send(get_with_auth("/manage/tables", &header_value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {header_value}");
        assert_eq!(body["error"], "Unauthorized");
    }

    // Even with a role the gate would refuse
    let guest = t.token("guest");
    let (status, _) = t
        .send(get_with_auth("/manage/tables", &format!("Token {guest}")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_or_expired_token() {
    let t = TestApp::new().await;

    let foreign = JwtService::new(JwtConfig {
        secret: "another-secret-another-secret-0000".to_string(),
        ..t.state.config.jwt.clone()
    });
    let token = foreign
        .generate_token("staff-1", "Mallory", Role::Manager)
        .unwrap();
    let (status, _) = t
        .send(get_with_auth("/manage/tables", &format!("Bearer {token}")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = JwtService::new(JwtConfig {
        expiration_minutes: -60,
        ..t.state.config.jwt.clone()
    });
    let token = expired
        .generate_token("staff-1", "Ann", Role::Manager)
        .unwrap();
    let (status, body) = t
        .send(get_with_auth("/manage/tables", &format!("Bearer {token}")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let t = TestApp::new().await;
    let guest = t.token("guest");

    let (status, _) = t.staff("GET", "/manage/tables", &guest, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t
        .staff(
            "POST",
            "/manage/tables",
            &guest,
            Some(json!({ "name": "T1", "capacity": 4 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t.staff("GET", "/manage/tables", &t.token(""), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manage_roles_are_configurable() {
    let t = TestApp::with_vars(&[("MANAGE_ROLES", "manager")]).await;

    let (status, _) = t
        .staff("GET", "/manage/tables", &t.employee_token(), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t
        .staff("GET", "/manage/tables", &t.token("manager"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_staff_token_is_not_an_access_code() {
    let t = TestApp::new().await;
    let token = t.employee_token();

    let (status, _) = t.send(get_with_auth("/customer/tables", &format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = t.customer(&token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = t.send(get("/customer/tables")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_and_use_token() {
    let t = TestApp::new().await;

    let (status, user) = t
        .send(post_json(
            "/auth/register",
            json!({
                "name": "Ann",
                "email": "Ann@Example.com",
                "password": "password123",
                "role": "manager"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["role"], "employee");
    assert!(user.get("passwordHash").is_none());

    let (status, body) = t
        .send(post_json(
            "/auth/register",
            json!({ "name": "Ann 2", "email": "ann@example.com", "password": "password456" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    let (status, login) = t
        .send(post_json(
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "password123" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["user"]["id"], user["id"]);
    assert_eq!(login["expiresIn"], 1440 * 60);
    let token = login["accessToken"].as_str().unwrap();

    let (status, _) = t.staff("GET", "/manage/tables", token, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_generic() {
    let t = TestApp::new().await;
    t.send(post_json(
        "/auth/register",
        json!({ "name": "Ann", "email": "ann@example.com", "password": "password123" }),
    ))
    .await;

    let (status, wrong_password) = t
        .send(post_json(
            "/auth/login",
            json!({ "email": "ann@example.com", "password": "password999" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = t
        .send(post_json(
            "/auth/login",
            json!({ "email": "bob@example.com", "password": "password123" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["error"], unknown["error"]);
    assert_eq!(unknown["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_register_validation() {
    let t = TestApp::new().await;
    let (status, body) = t
        .send(post_json(
            "/auth/register",
            json!({ "name": "Ann", "email": "not-an-email", "password": "short" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("email"));
    assert!(error.contains("password"));
}

async fn login_token(t: &TestApp, email: &str, password: &str) -> String {
    let (status, login) = t
        .send(post_json(
            "/auth/login",
            json!({ "email": email, "password": password }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    login["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_self_registration_cannot_become_manager() {
    let t = TestApp::with_vars(&[("MANAGE_ROLES", "manager")]).await;

    let (status, user) = t
        .send(post_json(
            "/auth/register",
            json!({
                "name": "Mallory",
                "email": "mallory@example.com",
                "password": "password123",
                "role": "manager"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "employee");

    let token = login_token(&t, "mallory@example.com", "password123").await;
    let claims = t.state.jwt_service.validate_token(&token).unwrap();
    assert_eq!(claims.role, "employee");

    let (status, _) = t
        .staff(
            "POST",
            "/manage/tables",
            &token,
            Some(json!({ "name": "T1", "capacity": 4 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Nor promote itself through the staff route
    let (status, _) = t
        .staff(
            "POST",
            "/manage/staff",
            &token,
            Some(json!({
                "name": "Mallory 2",
                "email": "mallory2@example.com",
                "password": "password123",
                "role": "manager"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manager_creates_staff_with_role() {
    let t = TestApp::new().await;
    let body = json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "password123",
        "role": "manager"
    });

    let (status, _) = t.send(post_json("/manage/staff", body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = t
        .staff("POST", "/manage/staff", &t.employee_token(), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, user) = t
        .staff("POST", "/manage/staff", &t.token("manager"), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "manager");

    let token = login_token(&t, "bob@example.com", "password123").await;
    let claims = t.state.jwt_service.validate_token(&token).unwrap();
    assert_eq!(claims.role, "manager");
}
