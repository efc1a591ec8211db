// tests/common/mod.rs
// Shared test utilities: an in-memory app and a cookie-aware client

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use contact_portal::contact::SqliteContactSink;
use contact_portal::db::{create_memory_pool, run_migrations};
use contact_portal::session::InMemorySessionStore;
use contact_portal::{AppState, PortalConfig, create_router};

pub const TEST_USERNAME: &str = "testuser";
pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub contact_sink: Arc<SqliteContactSink>,
    cookies: HashMap<String, String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn body_lower(&self) -> String {
        self.body.to_lowercase()
    }
}

/// Build the app over a fresh in-memory database seeded with the test user
pub async fn spawn_app() -> TestApp {
    let config = PortalConfig {
        bcrypt_cost: 4,
        ..PortalConfig::default()
    };

    let pool = create_memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();

    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl()));
    let contact_sink = Arc::new(SqliteContactSink::new(pool.clone()));
    let state = Arc::new(AppState::with_stores(
        pool,
        config,
        sessions,
        contact_sink.clone(),
    ));

    state
        .users
        .create_user(TEST_USERNAME, TEST_PASSWORD)
        .await
        .unwrap();

    TestApp {
        router: create_router(state.clone()),
        state,
        contact_sink,
        cookies: HashMap::new(),
    }
}

fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl TestApp {
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .unwrap();
        self.send(request).await
    }

    /// POST an arbitrary body, optionally with a Content-Type
    pub async fn post_raw(
        &mut self,
        path: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    /// Follow redirects with GET until a non-redirect response arrives
    pub async fn follow(&mut self, mut response: TestResponse) -> TestResponse {
        for _ in 0..5 {
            if !response.status.is_redirection() {
                return response;
            }
            let location = response.location.clone().expect("redirect without Location");
            response = self.get(&location).await;
        }
        panic!("too many redirects");
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    pub fn session_cookie(&self) -> Option<&str> {
        self.cookies.get("session_id").map(String::as_str)
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            request
                .headers_mut()
                .insert(header::COOKIE, cookie_header.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();
        self.store_cookies(&response);

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn store_cookies(&mut self, response: &Response<Body>) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or("");
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim().to_string();
            let value = value.trim().to_string();

            let lower = raw.to_ascii_lowercase();
            if value.is_empty() || lower.contains("max-age=0") {
                self.cookies.remove(&name);
            } else {
                self.cookies.insert(name, value);
            }
        }
    }
}
