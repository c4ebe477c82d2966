//! Test harness: full router over a throwaway SQLite file

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pos_server::auth::Claims;
use pos_server::core::{Config, ServerState};
use pos_server::db::DbService;
use pos_server::routes::build_app;
use serde_json::Value;
use shared::Role;
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_vars(&[]).await
    }

    pub async fn with_vars(extra: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("buffet.db");
        let url = format!("sqlite://{}", db_path.display());

        let mut vars: HashMap<String, String> = HashMap::from([
            ("JWT_SECRET".to_string(), SECRET.to_string()),
            ("DATABASE_URL".to_string(), url),
        ]);
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        let db = DbService::new(&config.database_url, config.db_acquire_timeout())
            .await
            .unwrap();
        let state = ServerState::with_db(config, db);
        let app = build_app(state.clone());

        Self {
            app,
            state,
            _dir: dir,
        }
    }

    /// Signed staff token carrying any role string, known or not
    pub fn token(&self, role: &str) -> String {
        let jwt = &self.state.jwt_service.config;
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "staff-1".to_string(),
            name: "Test Staff".to_string(),
            role: role.to_string(),
            exp: now + 3600,
            iat: now,
            iss: jwt.issuer.clone(),
            aud: jwt.audience.clone(),
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .unwrap()
    }

    pub fn employee_token(&self) -> String {
        self.token(Role::Employee.as_str())
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    /// Staff request with a bearer token
    pub async fn staff(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send(staff_request(method, uri, token, body)).await
    }

    /// Customer request with an access code
    pub async fn customer(&self, code: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("GET")
            .uri("/customer/tables")
            .header("AccessCode", code)
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    /// Create a table and return its id
    pub async fn add_table(&self, name: &str, capacity: i32) -> String {
        let token = self.employee_token();
        let (status, _) = self
            .staff(
                "POST",
                "/manage/tables",
                &token,
                Some(serde_json::json!({ "name": name, "capacity": capacity })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, list) = self.staff("GET", "/manage/tables", &token, None).await;
        list.as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == name)
            .map(|t| t["id"].as_str().unwrap().to_string())
            .unwrap()
    }

    /// Every stored table holds a code exactly while occupied
    pub async fn assert_invariant(&self) {
        for table in self.state.tables.find_all().await.unwrap() {
            assert!(table.is_consistent(), "inconsistent table: {table:?}");
        }
    }
}

pub fn staff_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
