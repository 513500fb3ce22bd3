use std::path::PathBuf;

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3001";

/// Default location of the seed file, relative to the working directory.
pub const DEFAULT_SEED_PATH: &str = "data/properties.json";

/// Runtime configuration shared by the service and its entry point.
///
/// The binary fills this from its config file and command line, then
/// hands it to the storage bootstrap and the listener.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Listen address for the HTTP server.
    pub listen: String,

    /// Path to the JSON seed file loaded into the record store at startup.
    /// Defaults to `data/properties.json` if not specified.
    pub seed_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            seed_path: None,
        }
    }
}

impl ServiceConfig {
    /// Listen on all interfaces at the given port (the `PORT` convention).
    pub fn with_port(mut self, port: u16) -> Self {
        self.listen = format!("0.0.0.0:{port}");
        self
    }

    /// Resolve the seed file path, falling back to `data/properties.json`.
    pub fn resolve_seed_path(&self) -> PathBuf {
        self.seed_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH))
    }
}
