use crate::adapters::http::default_routes;
use crate::core::{ConfigProvider, ProxyRoute};
use crate::utils::error::{BmkgError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_routes")]
    pub routes: Vec<ProxyRoute>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            routes: default_routes(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON partitions read at start-up. Empty means the bundled catalog.
    #[serde(default)]
    pub partitions: Vec<String>,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BmkgError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BmkgError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.proxy.routes.is_empty() {
            return Err(BmkgError::MissingConfigError {
                field: "proxy.routes".to_string(),
            });
        }

        for (index, route) in self.proxy.routes.iter().enumerate() {
            validation::validate_route_prefix(
                &format!("proxy.routes[{}].prefix", index),
                &route.prefix,
            )?;
            validation::validate_url(&format!("proxy.routes[{}].target", index), &route.target)?;
        }

        if let Some(user_agent) = &self.http.user_agent {
            validation::validate_non_empty_string("http.user_agent", user_agent)?;
        }

        for partition in &self.catalog.partitions {
            validation::validate_path("catalog.partitions", partition)?;
        }
        validation::validate_file_extensions("catalog.partitions", &self.catalog.partitions, &["json"])?;

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn proxy_routes(&self) -> &[ProxyRoute] {
        &self.proxy.routes
    }

    fn user_agent(&self) -> Option<&str> {
        self.http.user_agent.as_deref()
    }

    fn catalog_partitions(&self) -> &[String] {
        &self.catalog.partitions
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
