//! HTTP client with scope enforcement, rate limiting, and cookie support

use crate::core::rate_limit::RateLimiter;
use crate::core::scope::Scope;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use anyhow::Result;
use reqwest::{header, redirect::Policy, Client};
use std::collections::HashMap;
use std::time::Duration;

pub struct HttpClient {
    client: Client,
    scope: Scope,
    limiter: RateLimiter,
    default_headers: HashMap<String, String>,
    cookies: Option<String>,
}

impl HttpClient {
    pub fn new(
        scope: Scope,
        limiter: RateLimiter,
        cookies: Option<String>,
        headers: HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            scope,
            limiter,
            default_headers: headers,
            cookies,
        })
    }

    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse> {
        self.limiter.wait().await;

        if !self.scope.is_in_scope(&req.url) {
            anyhow::bail!("Blocked out-of-scope request: {}", req.url);
        }

        let mut request = self.client.request(req.method, req.url.clone());

        for (key, value) in &self.default_headers {
            if let (Ok(name), Ok(value)) = (
                header::HeaderName::from_bytes(key.as_bytes()),
                header::HeaderValue::from_str(value),
            ) {
                request = request.header(name, value);
            }
        }

        if let Some(ref cookies) = self.cookies {
            request = request.header(header::COOKIE, cookies);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        let body_bytes = response.bytes().await.unwrap_or_default();

        tracing::trace!("{} -> {} ({} bytes)", req.url, status, body_bytes.len());

        Ok(HttpResponse {
            status,
            body: body_bytes.to_vec(),
        })
    }
}
