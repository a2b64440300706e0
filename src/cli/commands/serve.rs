use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::args::ServeArgs;
use crate::error::{Result, ScoutError};
use crate::handler::AppHandler;
use crate::server;

/// Handle the serve command; runs until interrupted
pub async fn serve(handler: AppHandler, host: &str, args: &ServeArgs, default_port: u16) -> Result<String> {
    let host = args.host.as_deref().unwrap_or(host);
    let port = args.port.unwrap_or(default_port);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| ScoutError::InvalidArgument(format!("Invalid listen address {host}:{port}: {e}")))?;

    server::serve(Arc::new(handler), addr).await?;
    Ok(String::new())
}
