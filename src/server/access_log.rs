//! Persistent access log.
//!
//! One line per completed response:
//! `<client-ip> - <YYYY-mm-dd HH:MM:SS> - <path> - <code> <text>`.
//! The handle is cheap to clone; all clones share one writer behind an async
//! mutex, so lines from different connections never interleave.

use chrono::Local;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::http::response::StatusCode;

type Sink = Box<dyn AsyncWrite + Send + Unpin>;

/// A single access log record.
#[derive(Debug, Clone)]
pub struct AccessLogEntry<'a> {
    pub client: IpAddr,
    pub path: &'a str,
    pub status: StatusCode,
}

impl AccessLogEntry<'_> {
    pub fn format_line(&self, timestamp: &str) -> String {
        format!(
            "{} - {} - {} - {} {}\n",
            self.client,
            timestamp,
            self.path,
            self.status.as_u16(),
            self.status.reason_phrase()
        )
    }
}

#[derive(Clone)]
pub struct AccessLog {
    sink: Option<Arc<Mutex<Sink>>>,
}

impl AccessLog {
    /// Opens `path` for appending, creating it if needed.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .await?;
        Ok(Self::from_writer(file))
    }

    pub fn from_writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            sink: Some(Arc::new(Mutex::new(Box::new(writer)))),
        }
    }

    /// A log that drops every entry.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Appends one entry. Failures are reported through tracing and never
    /// reach the connection.
    pub async fn record(&self, entry: &AccessLogEntry<'_>) {
        let Some(sink) = &self.sink else {
            return;
        };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = entry.format_line(&timestamp);

        let mut sink = sink.lock().await;
        let result = match sink.write_all(line.as_bytes()).await {
            Ok(()) => sink.flush().await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to write access log entry");
        }
    }
}
