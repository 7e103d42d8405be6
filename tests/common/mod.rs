//! In-process stand-in for the GoPlus API.
//!
//! Serves canned bodies per path and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use goplus_guard::ClientConfig;
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn json(body: Value) -> Self {
        Self { status: 200, body: body.to_string() }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<HashMap<String, Canned>>,
    fallback: Option<Canned>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
}

impl MockServer {
    /// Serve `routes` (keyed by full path, e.g. `/api/v1/supported_chains`)
    pub async fn start(routes: Vec<(&str, Canned)>) -> Self {
        Self::start_with_fallback(routes, None).await
    }

    /// Serve `fallback` for every path not listed in `routes`
    pub async fn start_with_fallback(routes: Vec<(&str, Canned)>, fallback: Option<Canned>) -> Self {
        let state = MockState {
            routes: Arc::new(routes.into_iter().map(|(p, c)| (p.to_string(), c)).collect()),
            fallback,
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_urls(
            format!("http://{}/api/v1", self.addr),
            format!("http://{}/api/v2", self.addr),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get("authorization")
        .map(|v| v.to_str().unwrap_or_default().to_string());
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization,
        body,
    });

    let canned = state
        .routes
        .get(uri.path())
        .cloned()
        .or_else(|| state.fallback.clone());

    match canned {
        Some(canned) => {
            let status = StatusCode::from_u16(canned.status).unwrap();
            (status, [("content-type", "application/json")], canned.body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such route").into_response(),
    }
}
