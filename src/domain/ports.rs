use crate::utils::error::{BmkgError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How the transport should hand back the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Json(_) => "json",
        }
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            Payload::Text(text) => Ok(text),
            other => Err(BmkgError::UnexpectedPayload {
                expected: "text".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }

    pub fn into_json(self) -> Result<serde_json::Value> {
        match self {
            Payload::Json(value) => Ok(value),
            other => Err(BmkgError::UnexpectedPayload {
                expected: "json".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }
}

/// Prefix rewrite applied to relative request paths before they leave the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRoute {
    pub prefix: String,
    pub target: String,
}

impl ProxyRoute {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }
}

/// Generic GET. Non-success statuses must surface as errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        response_type: ResponseType,
    ) -> Result<Payload>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn proxy_routes(&self) -> &[ProxyRoute];
    fn user_agent(&self) -> Option<&str>;
    fn catalog_partitions(&self) -> &[String];
}
