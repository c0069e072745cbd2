//! gRPC transport for the IVR audio stream
//!
//! Implements the server side of the platform's bidirectional stream using
//! tonic's low-level `Grpc` server with the prost codec. Each accepted call
//! gets its own dispatch task.
//!
//! ## Service Definition
//!
//! ```protobuf
//! service GRPCStreamService {
//!     rpc SendIVRData(stream PlatformMessage) returns (stream AppMessage);
//! }
//! ```

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::mpsc;
use tonic::codegen::{Body, BoxFuture, Context, Poll, Service, StdError, empty_body, http};
use tonic::{Request, Response, Status, Streaming};
use tracing::{Instrument, info, info_span, warn};

use crate::core::ivr::{InboundMessage, MessageTransport, OutboundMessage, StreamDispatcher};
use crate::errors::stream_error::TransportError;
use crate::proto::{AppMessage, PlatformMessage, SEND_IVR_DATA_PATH, SERVICE_NAME};

/// Default response channel capacity per stream
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Response stream handed back to tonic for one call.
///
/// tonic's encoder drops responses it has buffered but not yet written when
/// the source yields an `Err`. A terminal status is therefore held back for
/// one `Pending` poll, which makes the encoder flush first; the status is
/// yielded on the next poll and ends up in the trailers.
pub struct AppMessageStream {
    rx: mpsc::Receiver<Result<AppMessage, Status>>,
    terminal: Option<Status>,
}

impl AppMessageStream {
    pub fn new(rx: mpsc::Receiver<Result<AppMessage, Status>>) -> Self {
        Self { rx, terminal: None }
    }
}

impl Stream for AppMessageStream {
    type Item = Result<AppMessage, Status>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(status) = self.terminal.take() {
            return Poll::Ready(Some(Err(status)));
        }

        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(Err(status))) => {
                self.terminal = Some(status);
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            other => other,
        }
    }
}

// =============================================================================
// Transport adapter
// =============================================================================

/// [`MessageTransport`] over one established gRPC bidi stream.
///
/// Inbound messages are read from the request stream; outbound messages are
/// pushed into the bounded channel that backs the response stream.
pub struct GrpcTransport {
    inbound: Streaming<PlatformMessage>,
    outbound: mpsc::Sender<Result<AppMessage, Status>>,
}

impl GrpcTransport {
    pub fn new(
        inbound: Streaming<PlatformMessage>,
        outbound: mpsc::Sender<Result<AppMessage, Status>>,
    ) -> Self {
        Self { inbound, outbound }
    }
}

#[async_trait]
impl MessageTransport for GrpcTransport {
    async fn receive_next(&mut self) -> Result<Option<InboundMessage>, TransportError> {
        match self.inbound.message().await {
            Ok(Some(message)) => Ok(Some(InboundMessage::from(message))),
            Ok(None) => Ok(None),
            Err(status) => Err(TransportError::Receive(format!(
                "{:?}: {}",
                status.code(),
                status.message()
            ))),
        }
    }

    async fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError> {
        self.outbound
            .send(Ok(AppMessage::from(message)))
            .await
            .map_err(|_| TransportError::Send("response stream closed by peer".to_string()))
    }
}

// =============================================================================
// Service
// =============================================================================

/// The `GRPCStreamService` implementation
#[derive(Debug, Clone)]
pub struct IvrStreamService {
    channel_capacity: usize,
}

impl Default for IvrStreamService {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl IvrStreamService {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Handle one `SendIVRData` call.
    ///
    /// Spawns the dispatch loop for the stream and returns the response stream
    /// right away. The loop's terminal error, if any, is delivered to the peer
    /// as the stream's final status.
    pub async fn send_ivr_data(
        &self,
        request: Request<Streaming<PlatformMessage>>,
    ) -> Result<Response<AppMessageStream>, Status> {
        let stream_id = uuid::Uuid::new_v4().to_string();
        let remote_addr = request.remote_addr();
        let (tx, rx) = mpsc::channel(self.channel_capacity);

        let span = info_span!("ivr_stream", stream_id = %stream_id);
        let transport = GrpcTransport::new(request.into_inner(), tx.clone());

        tokio::spawn(
            async move {
                info!(remote_addr = ?remote_addr, "Accepted IVR audio stream");

                let mut dispatcher = StreamDispatcher::new(transport);
                if let Err(e) = dispatcher.run().await {
                    if e.is_send_failure() {
                        return;
                    }
                    if tx.send(Err(Status::from(&e))).await.is_err() {
                        warn!("Peer went away before the terminal status could be delivered");
                    }
                }
            }
            .instrument(span),
        );

        Ok(Response::new(AppMessageStream::new(rx)))
    }
}

// =============================================================================
// tonic plumbing
// =============================================================================

/// tower `Service` wrapper routing gRPC requests to [`IvrStreamService`].
///
/// ```rust,no_run
/// use ivr_relay::transport::{IvrStreamServer, IvrStreamService};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// tonic::transport::Server::builder()
///     .add_service(IvrStreamServer::new(IvrStreamService::default()))
///     .serve("0.0.0.0:50051".parse()?)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IvrStreamServer {
    inner: Arc<IvrStreamService>,
}

impl IvrStreamServer {
    pub fn new(service: IvrStreamService) -> Self {
        Self {
            inner: Arc::new(service),
        }
    }
}

impl tonic::server::NamedService for IvrStreamServer {
    const NAME: &'static str = SERVICE_NAME;
}

/// Adapts [`IvrStreamService::send_ivr_data`] to tonic's streaming service trait
struct SendIvrDataSvc(Arc<IvrStreamService>);

impl tonic::server::StreamingService<PlatformMessage> for SendIvrDataSvc {
    type Response = AppMessage;
    type ResponseStream = AppMessageStream;
    type Future = BoxFuture<Response<Self::ResponseStream>, Status>;

    fn call(&mut self, request: Request<Streaming<PlatformMessage>>) -> Self::Future {
        let inner = Arc::clone(&self.0);
        Box::pin(async move { inner.send_ivr_data(request).await })
    }
}

impl<B> Service<http::Request<B>> for IvrStreamServer
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        match req.uri().path() {
            SEND_IVR_DATA_PATH => {
                let inner = Arc::clone(&self.inner);
                Box::pin(async move {
                    let codec = tonic::codec::ProstCodec::<AppMessage, PlatformMessage>::default();
                    let mut grpc = tonic::server::Grpc::new(codec);
                    Ok(grpc.streaming(SendIvrDataSvc(inner), req).await)
                })
            }
            _ => {
                warn!(path = %req.uri().path(), "Rejecting call to unknown gRPC method");
                Box::pin(async move { Ok(unimplemented_response()) })
            }
        }
    }
}

/// Trailers-only response carrying `grpc-status: 12` (UNIMPLEMENTED)
fn unimplemented_response() -> http::Response<tonic::body::BoxBody> {
    let mut response = http::Response::new(empty_body());
    let headers = response.headers_mut();
    headers.insert(
        "grpc-status",
        http::HeaderValue::from_static(UNIMPLEMENTED_STATUS),
    );
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/grpc"),
    );
    response
}

const UNIMPLEMENTED_STATUS: &str = "12";

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_terminal_status_waits_one_poll() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(AppMessage::default())).await.unwrap();
        tx.send(Err(Status::aborted("receive failed"))).await.unwrap();
        drop(tx);

        let mut stream = AppMessageStream::new(rx);
        let mut cx = Context::from_waker(std::task::Waker::noop());

        assert!(matches!(
            Pin::new(&mut stream).poll_next(&mut cx),
            Poll::Ready(Some(Ok(_)))
        ));
        assert!(Pin::new(&mut stream).poll_next(&mut cx).is_pending());
        match Pin::new(&mut stream).poll_next(&mut cx) {
            Poll::Ready(Some(Err(status))) => assert_eq!(status.code(), tonic::Code::Aborted),
            other => panic!("Expected terminal status, got {other:?}"),
        }
        assert!(matches!(
            Pin::new(&mut stream).poll_next(&mut cx),
            Poll::Ready(None)
        ));
    }

    #[test]
    fn test_channel_capacity_is_at_least_one() {
        assert_eq!(IvrStreamService::new(0).channel_capacity, 1);
        assert_eq!(
            IvrStreamService::default().channel_capacity,
            DEFAULT_CHANNEL_CAPACITY
        );
    }

    #[test]
    fn test_named_service() {
        use tonic::server::NamedService;
        assert_eq!(IvrStreamServer::NAME, "freeclimb.GRPCStreamService");
    }

    #[test]
    fn test_unimplemented_response_headers() {
        let response = unimplemented_response();
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.headers()["grpc-status"], UNIMPLEMENTED_STATUS);
        assert_eq!(
            response.headers()[http::header::CONTENT_TYPE],
            "application/grpc"
        );
    }

    #[test]
    fn test_unimplemented_status_matches_code() {
        assert_eq!(
            UNIMPLEMENTED_STATUS,
            (tonic::Code::Unimplemented as i32).to_string()
        );
    }
}
