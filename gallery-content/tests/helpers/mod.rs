//! Mock CMS server for integration tests
//!
//! Serves `GET /api/:collection` from a table of canned responses and
//! records every request (query parameters and cache headers) it receives.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use gallery_common::{BaseUrl, CmsConfig};
use gallery_content::ContentClient;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub collection: String,
    pub params: Vec<(String, String)>,
    pub cache_control: Option<String>,
    pub pragma: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockCms {
    addr: SocketAddr,
    state: MockState,
}

impl MockCms {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/api/:collection", get(serve_collection))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn respond(&self, collection: &str, response: MockResponse) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(collection.to_string(), response);
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ContentClient {
        let base = BaseUrl::parse(&self.base_url()).unwrap();
        ContentClient::new(&CmsConfig::with_base_url(base)).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, collection: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.collection == collection)
            .collect()
    }
}

async fn serve_collection(
    State(state): State<MockState>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        collection: collection.clone(),
        params,
        cache_control: header_text(header::CACHE_CONTROL),
        pragma: header_text(header::PRAGMA),
    });

    let canned = state.responses.lock().unwrap().get(&collection).cloned();
    let Some(canned) = canned else {
        return (StatusCode::NOT_FOUND, r#"{"error":"unknown collection"}"#).into_response();
    };

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], canned.body).into_response()
}

/// Address with nothing listening on it
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
