//! Server configuration loaded from the environment

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use crate::storage::LoadPolicy;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "data/athletes.json";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Where the athlete dataset lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON document on disk (default)
    File,
    /// Process memory only, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!("Unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    admin_email: String,
    admin_password: String,
    host: String,
    port: u16,
    data_file: String,
    public_dir: String,
    load_policy: String,
    storage: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub admin_email: String,
    pub admin_password: String,
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
    pub load_policy: LoadPolicy,
    pub storage: StorageBackend,
}

impl Config {
    /// Read `ADMIN_EMAIL`, `ADMIN_PASSWORD`, `HOST`, `PORT`, `DATA_FILE`,
    /// `PUBLIC_DIR`, `LOAD_POLICY` and `STORAGE`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_source(::config::Environment::default())
    }

    fn from_source(env: ::config::Environment) -> Result<Self> {
        let raw: RawConfig = ::config::Config::builder()
            .set_default("admin_email", DEFAULT_ADMIN_EMAIL)?
            .set_default("admin_password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("data_file", DEFAULT_DATA_FILE)?
            .set_default("public_dir", DEFAULT_PUBLIC_DIR)?
            .set_default("load_policy", "strict")?
            .set_default("storage", "file")?
            .add_source(env)
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration value")?;

        if raw.admin_password == DEFAULT_ADMIN_PASSWORD {
            warn!("ADMIN_PASSWORD not set, using default (insecure for production)");
        }

        Ok(Config {
            admin_email: raw.admin_email,
            admin_password: raw.admin_password,
            host: raw.host,
            port: raw.port,
            data_file: PathBuf::from(raw.data_file),
            public_dir: PathBuf::from(raw.public_dir),
            load_policy: raw.load_policy.parse().context("Invalid LOAD_POLICY")?,
            storage: raw.storage.parse().context("Invalid STORAGE")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
