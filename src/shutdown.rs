use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Token cancelled by the first Ctrl+C. This is the only way the listener
/// stops without an error.
pub fn ctrl_c_token() -> CancellationToken {
    let token = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(token.clone()));
    token
}

async fn cancel_on_ctrl_c(token: CancellationToken) {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error=%e, "Ctrl+C handler unavailable, listening until the connection fails");
        return;
    }

    info!("Ctrl+C received, closing connection");
    token.cancel();
}
