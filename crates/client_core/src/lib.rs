use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Endpoint,
    protocol::{
        AnalysisResult, AnalyzeRequest, ReferenceSign, TranscribeRequest, TranscriptionResult,
        WorkedExample,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod config;
pub mod input;
pub mod orchestrator;
pub mod reference;
pub mod render;

pub use config::Settings;
pub use input::InputSurface;
pub use orchestrator::{transcribe_and_analyze, DecodeStep, Transcription};
pub use render::{AnalysisLine, AnalysisView};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Build(reqwest::Error),
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("{endpoint} returned a malformed body: {source}")]
    Malformed {
        endpoint: &'static str,
        source: serde_json::Error,
    },
    #[error("{endpoint} returned an empty collection")]
    EmptyCollection { endpoint: &'static str },
}

/// Request/response surface of the remote decoding service. One attempt per
/// call; no retry, caching or authentication.
#[async_trait]
pub trait DecoderApi: Send + Sync {
    async fn transcribe(&self, text: &str) -> Result<TranscriptionResult, ClientError>;
    async fn analyze(&self, word: &str) -> Result<AnalysisResult, ClientError>;
    async fn examples(&self) -> Result<Vec<WorkedExample>, ClientError>;
    async fn syllabary(&self) -> Result<Vec<ReferenceSign>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpDecoderClient {
    http: Client,
    base_url: Url,
}

impl HttpDecoderClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            base_url: parse_base_url(server_url)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.server_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|source| ClientError::InvalidServerUrl {
                url: self.base_url.to_string(),
                source,
            })
    }

    async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .post(self.endpoint_url(endpoint)?)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.name(),
                source,
            })?;
        // Rejections arrive as 4xx/5xx with a JSON body, so the status is not
        // checked here.
        debug!(endpoint = endpoint.name(), status = res.status().as_u16(), "response");
        read_json(endpoint, res).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ClientError> {
        let res = self
            .http
            .get(self.endpoint_url(endpoint)?)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.name(),
                source,
            })?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                endpoint: endpoint.name(),
                status: res.status().as_u16(),
            });
        }
        read_json(endpoint, res).await
    }
}

#[async_trait]
impl DecoderApi for HttpDecoderClient {
    async fn transcribe(&self, text: &str) -> Result<TranscriptionResult, ClientError> {
        self.post_json(
            Endpoint::Transcribe,
            &TranscribeRequest {
                text: text.to_string(),
            },
        )
        .await
    }

    async fn analyze(&self, word: &str) -> Result<AnalysisResult, ClientError> {
        self.post_json(
            Endpoint::Analyze,
            &AnalyzeRequest {
                word: word.to_string(),
            },
        )
        .await
    }

    async fn examples(&self) -> Result<Vec<WorkedExample>, ClientError> {
        self.get_json(Endpoint::Examples).await
    }

    async fn syllabary(&self) -> Result<Vec<ReferenceSign>, ClientError> {
        self.get_json(Endpoint::Syllabary).await
    }
}

async fn read_json<T: DeserializeOwned>(
    endpoint: Endpoint,
    res: Response,
) -> Result<T, ClientError> {
    let bytes = res.bytes().await.map_err(|source| ClientError::Transport {
        endpoint: endpoint.name(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Malformed {
        endpoint: endpoint.name(),
        source,
    })
}

/// Endpoint paths are relative, so the base must end in `/` for `Url::join`
/// to keep any path prefix.
fn parse_base_url(server_url: &str) -> Result<Url, ClientError> {
    let trimmed = server_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|source| ClientError::InvalidServerUrl {
        url: server_url.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
