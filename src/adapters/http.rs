use crate::core::{ConfigProvider, Payload, ProxyRoute, ResponseType, Transport};
use crate::utils::error::{BmkgError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DATA_HOST: &str = "https://data.bmkg.go.id";
pub const API_HOST: &str = "https://api.bmkg.go.id";

/// The two upstreams the clients talk to, keyed by the prefixes they request.
pub fn default_routes() -> Vec<ProxyRoute> {
    vec![
        ProxyRoute::new("/api-bmkg", API_HOST),
        ProxyRoute::new("/gempa-bmkg", DATA_HOST),
    ]
}

/// reqwest-backed [`Transport`]. No timeout or retry is configured here.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    routes: Vec<ProxyRoute>,
}

impl ReqwestTransport {
    pub fn new(routes: Vec<ProxyRoute>) -> Self {
        Self {
            client: Client::new(),
            routes,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            client: builder.build()?,
            routes: config.proxy_routes().to_vec(),
        })
    }

    /// Rewrites `path` through the first route whose prefix it starts with.
    pub fn resolve(&self, path: &str) -> Result<String> {
        let route = self
            .routes
            .iter()
            .find(|route| path.starts_with(&route.prefix))
            .ok_or_else(|| BmkgError::RouteNotFound {
                path: path.to_string(),
            })?;

        Ok(format!(
            "{}{}",
            route.target.trim_end_matches('/'),
            &path[route.prefix.len()..]
        ))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(default_routes())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        response_type: ResponseType,
    ) -> Result<Payload> {
        let url = self.resolve(path)?;

        tracing::debug!("Making API request to: {} {:?}", url, query);
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        match response_type {
            ResponseType::Text => Ok(Payload::Text(response.text().await?)),
            ResponseType::Json => Ok(Payload::Json(response.json().await?)),
        }
    }
}
