//! HTTP adapter for the backend invoker port
//!
//! Talks to an OpenAI-compatible chat completions gateway. Every fleet
//! backend is addressed by its model identifier through one base URL;
//! the gateway is expected to route to the actual provider.

use async_trait::async_trait;
use concierge_application::ports::backend_invoker::{BackendInvoker, Invocation, InvokerError};
use concierge_domain::{Backend, RoutingTable};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default gateway endpoint path
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completions response body, reduced to the parts we read
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// [`BackendInvoker`] implementation over an HTTP gateway
pub struct HttpBackendInvoker {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    table: Arc<RoutingTable>,
}

impl HttpBackendInvoker {
    pub fn new(base_url: impl Into<String>, table: Arc<RoutingTable>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            table,
        }
    }

    /// Attach a bearer token sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    /// Map an HTTP-level outcome onto the port's error taxonomy
    fn map_status(status: StatusCode, body: &str) -> InvokerError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return InvokerError::RateLimited;
        }
        if status.is_server_error() {
            return InvokerError::Unavailable(format!(
                "gateway returned {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }
        InvokerError::InvalidResponse(format!(
            "unexpected status {}: {}",
            status.as_u16(),
            concierge_domain::truncate_str(body, 200)
        ))
    }
}

#[async_trait]
impl BackendInvoker for HttpBackendInvoker {
    async fn invoke(
        &self,
        backend: &Backend,
        system_prompt: &str,
        prompt: &str,
        deadline: Duration,
    ) -> Result<Invocation, InvokerError> {
        let start = Instant::now();
        let body = ChatRequest {
            model: backend.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!(backend = %backend, deadline_ms = deadline.as_millis() as u64, "Dispatching backend call");
        let mut request = self
            .client
            .post(self.endpoint())
            .timeout(deadline)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(InvokerError::Timeout),
            Err(e) => return Err(InvokerError::Unavailable(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(backend = %backend, status = status.as_u16(), "Backend call failed");
            return Err(Self::map_status(status, &body));
        }

        let parsed: ChatResponse = match response.json().await {
            Ok(p) => p,
            Err(e) if e.is_timeout() => return Err(InvokerError::Timeout),
            Err(e) => return Err(InvokerError::InvalidResponse(e.to_string())),
        };

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                InvokerError::InvalidResponse("response carried no choices".to_string())
            })?;

        Ok(Invocation::new(
            content,
            start.elapsed().as_millis() as u64,
            self.table.cost_of(backend),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let table = Arc::new(RoutingTable::default());
        let a = HttpBackendInvoker::new("http://localhost:8080", Arc::clone(&table));
        let b = HttpBackendInvoker::new("http://localhost:8080/", table);
        assert_eq!(a.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(b.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HttpBackendInvoker::map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            InvokerError::RateLimited
        );
        assert!(matches!(
            HttpBackendInvoker::map_status(StatusCode::BAD_GATEWAY, ""),
            InvokerError::Unavailable(_)
        ));
        assert!(matches!(
            HttpBackendInvoker::map_status(StatusCode::BAD_REQUEST, "{\"error\":\"bad\"}"),
            InvokerError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: Backend::ClaudeSonnet45.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4.5");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }
}
