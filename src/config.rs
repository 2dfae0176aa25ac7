use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var naming the YAML config file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "lantern.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub access_log: AccessLogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Value of the `Server` response header
    pub server_name: String,
    /// Keep connections without a `Connection` header open (HTTP/1.1 default)
    pub assume_keep_alive: bool,
    /// Close connections that send nothing for this long
    pub idle_timeout_secs: Option<u64>,
    /// Upper bound on concurrently served connections
    pub max_connections: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub root: PathBuf,
    /// Write demo files into an empty root at startup
    pub seed_sample_content: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessLogConfig {
    pub path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            server_name: concat!("Lantern/", env!("CARGO_PKG_VERSION")).to_string(),
            assume_keep_alive: false,
            idle_timeout_secs: None,
            max_connections: None,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            seed_sample_content: false,
        }
    }
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("server_log.txt"),
        }
    }
}

impl Config {
    /// Loads the config file named by `LANTERN_CONFIG` (or `lantern.yaml`),
    /// falling back to defaults when it does not exist, then applies the
    /// `LISTEN` and `DOC_ROOT` env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut cfg = Self::from_file_or_default(Path::new(&path))?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_file_or_default(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_yaml_str(&text)
                .with_context(|| format!("parsing config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("reading config file {}", path.display()))
            }
        }
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null, not to an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(listen_addr) = std::env::var("LISTEN") {
            self.server.listen_addr = listen_addr;
        }
        if let Ok(root) = std::env::var("DOC_ROOT") {
            self.static_files.root = PathBuf::from(root);
        }
    }
}
