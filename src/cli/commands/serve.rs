//! Serve command: run the HTTP streaming chat server.

use crate::config::Settings;
use crate::server;

/// Run the HTTP server, with CLI overrides for host and port.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    server::run(&host, port, settings).await
}
