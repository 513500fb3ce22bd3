//! Server configuration file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:3001"
//!
//! [storage]
//! seed_path = "data/properties.json"
//! ```
//!
//! Every key is optional. Command-line flags win over the file; `PORT`
//! wins over the file's listen address but not over `--listen`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use estate_core::ServiceConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub seed_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load config from disk. The file must exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Combine the file with command-line flags and the `PORT` variable.
    pub fn resolve(
        &self,
        listen: Option<&str>,
        seed: Option<&Path>,
        port: Option<&str>,
    ) -> anyhow::Result<ServiceConfig> {
        let mut config = ServiceConfig::default();
        if let Some(file_listen) = &self.server.listen {
            config.listen = file_listen.clone();
        }
        config.seed_path = self.storage.seed_path.clone();

        match (listen, port) {
            (Some(addr), _) => config.listen = addr.to_string(),
            (None, Some(port)) => {
                let port: u16 = port
                    .trim()
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got {port:?}"))?;
                config = config.with_port(port);
            }
            (None, None) => {}
        }
        if let Some(seed) = seed {
            config.seed_path = Some(seed.to_path_buf());
        }
        Ok(config)
    }
}
