//! `reqwest`-backed transport.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{ApiRequest, ApiResponse, Auth, HttpMethod, Payload, Transport};
use crate::error_handling::{categorize_reqwest_error, TransportError};

/// Sends API requests with a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<reqwest::Client>,
}

impl HttpTransport {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        builder = match &request.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => builder.basic_auth(username, Some(password)),
            Auth::Bearer { token } => builder.bearer_auth(token),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.payload {
            Payload::Query(pairs) => builder.query(pairs),
            Payload::Json(body) => builder.json(body),
        };

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("{:?} {}", request.method, request.url);

        let response = builder
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&request.url, &e))?;

        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            // Keep the body: APIs explain rejected queries and bad credentials there
            let body = response.text().await.ok();
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&url, &e))?;
        let body = serde_json::from_str(&text).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
