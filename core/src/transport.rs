//! The HTTP round-trip behind every template operation.
//!
//! # Design
//! `Transport` is the single seam between the template and the network.
//! Any status the server sends back, 4xx and 5xx included, is returned as an
//! `HttpResponse` so the template alone decides what a status means. `Err` is
//! reserved for exchanges that produced no response at all.

use std::time::Duration;

use crate::error::{Result, TemplateError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Redirect hops followed before `UreqTransport` gives up.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Executes one request and returns the server's answer.
pub trait Transport: Send + Sync {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport on a shared `ureq` agent.
///
/// Follows redirects, never turns a status code into an error, and applies an
/// optional global timeout to every exchange.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(DEFAULT_MAX_REDIRECTS)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            uri,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&uri), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&uri), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&uri), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&uri), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&uri), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&uri), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| {
            tracing::debug!(method = method.as_str(), uri = %uri, error = %e, "exchange failed");
            TemplateError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TemplateError::Transport(e.to_string()))?;

        tracing::debug!(method = method.as_str(), uri = %uri, status, "exchange completed");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
