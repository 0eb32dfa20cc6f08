#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use client::{AuthClient, ClientError, HttpRequest, HttpResponse, Session, Transport};
use serde_json::{Value, json};

pub const PREFIX: &str = "/api/v1";

type Handler = dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync;

/// In-memory server: answers with `handler` and records every request.
pub struct MockTransport {
    handler: Box<Handler>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes requests to `path` take `delay` before answering.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.path == path)
            .count()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delays.get(&request.path) {
            tokio::time::sleep(*delay).await;
        }
        Ok((self.handler)(request))
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string())
}

pub fn ok(data: Value) -> HttpResponse {
    json_response(200, json!({"success": true, "data": data}))
}

pub fn unauthorized() -> HttpResponse {
    json_response(401, json!({"success": false, "error": "Unauthorized"}))
}

pub fn path(suffix: &str) -> String {
    format!("{PREFIX}{suffix}")
}

pub fn user_json() -> Value {
    json!({
        "id": "7f1c",
        "username": "jane",
        "email": "jane@example.com",
        "netSalaryUsd": 1190
    })
}

pub fn client_with(transport: MockTransport) -> Arc<AuthClient<MockTransport>> {
    Arc::new(AuthClient::new(transport, PREFIX, Session::new()))
}
