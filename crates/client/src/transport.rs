//! HTTP plumbing behind the client.
//!
//! Requests go through the [`Transport`] trait so the auth and API layers can
//! be driven by an in-memory server in tests.

use std::{future::Future, sync::Arc, time::Duration};

use reqwest::{
    Method, Url,
    cookie::{CookieStore, Jar},
};
use serde::Serialize;
use serde_json::Value;

use crate::{ClientError, StoredCookie};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path below the base URL, e.g. `/api/v1/transactions`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attaches a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body parsed as JSON; `None` for empty or non-JSON bodies.
    #[must_use]
    pub fn json_value(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Sends one request and hands back the raw response.
///
/// Implementations keep credentials (cookies) between calls; non-2xx statuses
/// are responses, not errors.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ClientError>> + Send;
}

/// [`Transport`] over `reqwest`, with a cookie store so the access and refresh
/// cookies set by the server are sent back like a browser would.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|err| ClientError::Validation(format!("invalid base_url: {err}")))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .user_agent(concat!("fintrack/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// `true` when a cookie named `name` would be sent to `path`.
    pub fn has_cookie(&self, path: &str, name: &str) -> bool {
        self.cookie_pairs(path).iter().any(|pair| {
            pair.split_once('=')
                .is_some_and(|(key, value)| key == name && !value.is_empty())
        })
    }

    /// Cookies the jar holds for each of `paths`, each pair listed once under
    /// the first path it is sent to.
    pub fn export_cookies(&self, paths: &[&str]) -> Vec<StoredCookie> {
        let mut stored: Vec<StoredCookie> = Vec::new();
        for path in paths {
            for pair in self.cookie_pairs(path) {
                if stored.iter().all(|cookie| cookie.pair != pair) {
                    stored.push(StoredCookie {
                        path: (*path).to_string(),
                        pair,
                    });
                }
            }
        }
        stored
    }

    /// Puts saved cookies back into the jar.
    pub fn import_cookies(&self, cookies: &[StoredCookie]) {
        for cookie in cookies {
            if let Ok(url) = Url::parse(&self.url(&cookie.path)) {
                self.jar
                    .add_cookie_str(&format!("{}; Path={}", cookie.pair, cookie.path), &url);
            }
        }
    }

    fn cookie_pairs(&self, path: &str) -> Vec<String> {
        let Ok(url) = Url::parse(&self.url(path)) else {
            return Vec::new();
        };
        self.jar
            .cookies(&url)
            .and_then(|header| header.to_str().map(str::to_string).ok())
            .map(|header| {
                header
                    .split(';')
                    .map(|pair| pair.trim().to_string())
                    .filter(|pair| !pair.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(method = %request.method, path = %request.path, status, "http response");
        Ok(HttpResponse { status, body })
    }
}
