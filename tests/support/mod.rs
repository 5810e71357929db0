#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use ticketdesk::{
    api::ApiClient,
    config::AppConfig,
    features::auth::AuthManager,
    navigation::{History, Navigator, Route},
    session::{MemoryStorage, SessionStore},
};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the REST backend. Routes are keyed by method and
/// path below `/api`; unknown routes answer 404.
#[derive(Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.routes
            .lock()
            .expect("routes lock")
            .insert((method.to_string(), path.to_string()), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Binds an ephemeral port and returns the API base URL.
    pub async fn serve(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new().fallback(handle).with_state(self.clone());

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("mock backend stopped: {err:?}");
            }
        });

        format!("http://{addr}/api")
    }
}

async fn handle(
    State(mock): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api")
        .unwrap_or(uri.path())
        .to_string();

    mock.requests.lock().expect("requests lock").push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    let route = mock
        .routes
        .lock()
        .expect("routes lock")
        .get(&(method.to_string(), path))
        .cloned();

    match route {
        Some((status, body)) => (
            StatusCode::from_u16(status).expect("valid status"),
            Json(body),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Not found" })),
        )
            .into_response(),
    }
}

pub struct Desk {
    pub auth: AuthManager,
    pub history: History,
    pub storage: Arc<MemoryStorage>,
}

impl Desk {
    pub fn new(base_url: &str, storage: MemoryStorage) -> Self {
        let storage = Arc::new(storage);
        let session = SessionStore::new(storage.clone());
        let history = History::new(Route::Home);
        let navigator: Arc<dyn Navigator> = Arc::new(history.clone());
        let config = AppConfig {
            api_base_url: base_url.to_string(),
            ..AppConfig::default()
        };
        let api = ApiClient::new(&config, session, Arc::clone(&navigator))
            .expect("failed to build api client");

        Self {
            auth: AuthManager::new(api, navigator),
            history,
            storage,
        }
    }

    pub fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    pub fn location(&self) -> Option<Route> {
        self.history.location()
    }
}

pub fn user_json(id: u64, role: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{role} user"),
        "email": format!("{role}@example.com"),
        "role": role,
        "status": "active"
    })
}

/// Signs `desk` in as a user with `role` through the login endpoint.
pub async fn sign_in(mock: &MockBackend, desk: &Desk, role: &str) {
    mock.respond(
        "POST",
        "/auth/login",
        200,
        json!({ "token": format!("{role}-token"), "user": user_json(7, role) }),
    );
    desk.auth.check_session().await;
    let outcome = desk
        .auth
        .login(&format!("{role}@example.com"), "secret1")
        .await;
    assert!(outcome.success, "login failed: {:?}", outcome.error);
}
