use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::ServerContext;

/// Pause after a failed accept so a persistent error (e.g. EMFILE) does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let ctx = ServerContext::from_config(cfg).await?;

    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!(
        "Listening on http://{} serving {}",
        cfg.server.listen_addr,
        ctx.handler.root().path().display()
    );

    serve(listener, ctx, cfg.server.max_connections).await
}

/// Accepts connections forever, one task per connection.
///
/// With `max_connections` set, the loop waits for a free slot before
/// accepting the next socket. A failing connection never stops the loop.
pub async fn serve(
    listener: TcpListener,
    ctx: Arc<ServerContext>,
    max_connections: Option<usize>,
) -> anyhow::Result<()> {
    let limiter = max_connections.map(|n| Arc::new(Semaphore::new(n)));

    loop {
        let permit = match &limiter {
            Some(limiter) => Some(limiter.clone().acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let ctx = ctx.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, peer, ctx);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
