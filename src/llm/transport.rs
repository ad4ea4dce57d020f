//! HTTP transport shared by the provider clients.
//!
//! Both providers take a JSON POST and answer 200 with a JSON body. Any other
//! status is surfaced as [`LlmError::ApiResponse`] with the raw body, which
//! callers log but never forward to end users.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::config::LlmTimeouts;
use super::types::LlmError;

pub(crate) struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub(crate) fn new(timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// POST `body` to `url` with extra `headers`; return the 200 body text.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &B,
    ) -> Result<String, LlmError> {
        let mut request = self.http.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        debug!(status, bytes = text.len(), "llm: provider responded");

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}
