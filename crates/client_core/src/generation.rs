use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GenerateRequest, GenerateResponse, GENERATE_PATH};

use crate::error::{ClientError, Result};

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Requests one image for `prompt` and returns its URL.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct HttpGenerationClient {
    http: Client,
    api_url: String,
}

impl HttpGenerationClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), api_url)
    }

    pub fn with_http_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{GENERATE_PATH}", self.api_url)
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        Ok(body.images)
    }
}

#[cfg(test)]
#[path = "tests/generation_tests.rs"]
mod tests;
