//! Listener bootstrap for the gRPC relay and the webhook service
//!
//! Both listeners take an already-bound `TcpListener` so tests can bind an
//! ephemeral port first, and both stop when the shared `CancellationToken`
//! is cancelled.

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;
use crate::transport::{IvrStreamServer, IvrStreamService};
use std::sync::Arc;

/// Serve `GRPCStreamService` on `listener` until `shutdown` is cancelled.
///
/// Streams still in flight at shutdown are left to finish on their own tasks.
pub async fn serve_grpc(
    listener: TcpListener,
    service: IvrStreamService,
    shutdown: CancellationToken,
) -> Result<(), tonic::transport::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("gRPC relay listening on {}", addr);
    }

    tonic::transport::Server::builder()
        .add_service(IvrStreamServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.cancelled().await;
        })
        .await?;

    info!("gRPC relay stopped");
    Ok(())
}

/// Serve the webhook router on `listener` until `shutdown` is cancelled.
pub async fn serve_webhook(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Webhook service listening on http://{}", addr);
    }

    let app = routes::webhook::create_webhook_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
        })
        .await?;

    info!("Webhook service stopped");
    Ok(())
}

/// Token that is cancelled on the first Ctrl-C.
pub fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
        trigger.cancel();
    });

    token
}
