//! Process-level plumbing: accepting sockets, the access log, startup content.

pub mod access_log;
pub mod listener;
pub mod sample;

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::http::handler::RequestHandler;
use crate::http::path::DocumentRoot;
use access_log::AccessLog;

/// State shared by every connection task.
pub struct ServerContext {
    pub handler: RequestHandler,
    pub access_log: AccessLog,
    /// How long a connection may wait for request bytes; `None` waits forever.
    pub idle_timeout: Option<Duration>,
}

impl ServerContext {
    pub fn new(handler: RequestHandler, access_log: AccessLog) -> Self {
        Self {
            handler,
            access_log,
            idle_timeout: None,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Validates the document root and opens the access log described by `cfg`.
    ///
    /// The root is created if it does not exist yet.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Arc<Self>> {
        let root_dir = &cfg.static_files.root;
        tokio::fs::create_dir_all(root_dir)
            .await
            .with_context(|| format!("creating document root {}", root_dir.display()))?;

        if cfg.static_files.seed_sample_content {
            sample::seed(root_dir).await?;
        }

        let root = DocumentRoot::new(root_dir)
            .with_context(|| format!("opening document root {}", root_dir.display()))?;

        let access_log = AccessLog::open(&cfg.access_log.path)
            .await
            .with_context(|| format!("opening access log {}", cfg.access_log.path.display()))?;

        let handler = RequestHandler::new(
            root,
            cfg.server.server_name.clone(),
            cfg.server.assume_keep_alive,
        );

        let ctx = Self::new(handler, access_log)
            .with_idle_timeout(cfg.server.idle_timeout_secs.map(Duration::from_secs));

        Ok(Arc::new(ctx))
    }
}
