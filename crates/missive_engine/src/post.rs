use std::time::Duration;

use futures_util::StreamExt;
use missive_logging::missive_debug;
use reqwest::header::CONTENT_TYPE;

use crate::{decode_reply, DispatchError, FailureKind, ServerReply};

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Overall request deadline. `None` lets a call run until the transport gives up.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl DispatchSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 1024 * 1024,
        }
    }
}

/// Sends one text payload and yields the endpoint's structured reply.
#[async_trait::async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, content: &str) -> Result<ServerReply, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPoster {
    settings: DispatchSettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestPoster {
    pub fn new(settings: DispatchSettings) -> Result<Self, DispatchError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| DispatchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait::async_trait]
impl Poster for ReqwestPoster {
    async fn post(&self, content: &str) -> Result<ServerReply, DispatchError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(content.to_owned())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        missive_debug!(
            "POST {} answered http {}",
            response.url(),
            response.status().as_u16()
        );

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(DispatchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(DispatchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        decode_reply(&body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return DispatchError::new(FailureKind::MalformedResponse, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}
