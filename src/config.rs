use anyhow::{Context, Result, bail};
use std::env;

use crate::cors::CorsPolicy;

const DEFAULT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    [DEFAULT_ORIGIN, "https://d3odzc270i77yq.cloudfront.net"];

/// Spanner database coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
    pub region: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

/// Which item store backs the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Spanner(SpannerConfig),
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub table_name: String,
    pub allowed_origins: Vec<String>,
    pub default_origin: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} environment variable is required"))
        };

        let store = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "spanner".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "spanner" => StoreConfig::Spanner(SpannerConfig {
                emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                project: required("SPANNER_PROJECT")?,
                instance: required("SPANNER_INSTANCE")?,
                database: required("SPANNER_DATABASE")?,
                region: lookup("SPANNER_REGION").unwrap_or_else(|| "us-central1".to_string()),
            }),
            "memory" => StoreConfig::Memory,
            other => bail!("STORE_BACKEND must be 'spanner' or 'memory', got '{}'", other),
        };

        let table_name =
            lookup("USER_ITEMS_TABLE_NAME").unwrap_or_else(|| "user_items".to_string());
        if !is_valid_table_name(&table_name) {
            bail!(
                "USER_ITEMS_TABLE_NAME must start with a letter and contain only letters, digits and underscores, got '{}'",
                table_name
            );
        }

        let allowed_origins = match lookup("FRONTEND_ORIGIN").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_origins(&raw),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let default_origin = lookup("DEFAULT_ORIGIN")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store,
            table_name,
            allowed_origins,
            default_origin,
            service_port,
            service_host,
        })
    }

    pub fn cors_policy(&self) -> CorsPolicy {
        CorsPolicy::new(self.allowed_origins.clone(), self.default_origin.clone())
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.store {
            StoreConfig::Spanner(spanner) => {
                tracing::info!("  Store backend: spanner");
                let emulator = spanner
                    .emulator_host
                    .as_deref()
                    .unwrap_or("disabled (using production)");
                tracing::info!("  Spanner emulator: {}", emulator);
                tracing::info!("  Spanner database: {}", spanner.database_path());
                tracing::info!("  Spanner region: {}", spanner.region);
            }
            StoreConfig::Memory => {
                tracing::info!("  Store backend: memory (data is lost on restart)");
            }
        }
        tracing::info!("  Items table: {}", self.table_name);
        tracing::info!("  Allowed origins: {}", self.allowed_origins.join(", "));
        tracing::info!("  Default origin: {}", self.default_origin);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

// The table name is interpolated into SQL and DDL.
fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
