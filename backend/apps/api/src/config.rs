//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;

use anyhow::{Context, bail};
use platform::staff::StaffDirectory;
use registry::config::DEFAULT_ORGANIZATION_NAME;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Where staff tokens came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffSource {
    Configured,
    /// Generated for this run; the token is logged once
    Development(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub staff: StaffDirectory,
    pub staff_source: StaffSource,
    pub organization_name: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `allow_dev_staff` permits a generated staff token when
    /// `STAFF_TOKENS` is unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_dev_staff: bool,
    ) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_raw}"))?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let (staff, staff_source) = match lookup("STAFF_TOKENS").filter(|s| !s.trim().is_empty()) {
            Some(raw) => (StaffDirectory::parse(&raw)?, StaffSource::Configured),
            None if allow_dev_staff => {
                let (directory, token) = StaffDirectory::development();
                (directory, StaffSource::Development(token))
            }
            None => bail!("STAFF_TOKENS must be set in production"),
        };

        let organization_name = lookup("ORGANIZATION_NAME")
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_ORGANIZATION_NAME.to_string());

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            staff,
            staff_source,
            organization_name,
        })
    }
}
