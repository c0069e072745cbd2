//! Stream dispatch engine
//!
//! Drives one audio stream: receive a notification, apply the per-message
//! policy, send the response (if any), then ask for the next notification.
//! Exactly one message is in flight per stream, so responses always leave in
//! the order their triggering notifications arrived.
//!
//! # Policy
//!
//! | Notification   | State effect               | Response                          |
//! |----------------|----------------------------|-----------------------------------|
//! | `CallStarted`  | store content type         | none                              |
//! | `CallEnded`    | none                       | none                              |
//! | `AudioNotify`  | none                       | `PlayAudio` once content type set |
//! | `DtmfEnd`      | none                       | `PressDtmf` echo                  |
//! | `Other`        | none                       | none                              |

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::messages::{InboundMessage, OutboundMessage};
use super::session::SessionState;
use crate::errors::stream_error::{StreamError, StreamResult, TransportError};

/// Id attached to every relayed audio frame
pub const PLAY_AUDIO_ID: &str = "testing";

/// Id attached to every DTMF echo
pub const PRESS_DTMF_ID: &str = "echo";

/// How long each echoed digit is held down
pub const DTMF_PRESS_DURATION_MS: u32 = 100;

/// Gap between echoed digits
pub const DTMF_BREAK_DURATION_MS: u32 = 100;

/// Sequence number used for every DTMF echo
pub const DTMF_SEQUENCE_NUM: u64 = 1;

/// Sequential receive/send primitives over one established stream.
///
/// `receive_next` returns `Ok(None)` once the peer has closed its side.
#[async_trait]
pub trait MessageTransport: Send {
    async fn receive_next(&mut self) -> Result<Option<InboundMessage>, TransportError>;

    async fn send(&mut self, message: OutboundMessage) -> Result<(), TransportError>;
}

/// Counters for one stream, reported when it ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub messages_received: u64,
    pub responses_sent: u64,
    /// Audio frames that arrived before any content type was negotiated
    pub protocol_anomalies: u64,
    pub unrecognized_messages: u64,
}

/// Result of one loop iteration that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Peer closed the stream
    Finished,
}

/// Session state plus counters; applies the message policy without any I/O.
#[derive(Debug, Default)]
pub struct StreamContext {
    session: SessionState,
    stats: StreamStats,
}

impl StreamContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Apply the policy for one notification and return the response to send.
    pub fn handle(&mut self, message: InboundMessage) -> Option<OutboundMessage> {
        self.stats.messages_received += 1;

        match message {
            InboundMessage::CallStarted {
                call_id,
                content_type,
            } => {
                info!(
                    call_id = %call_id,
                    content_type = %content_type,
                    "Received call started notification"
                );
                if let Some(previous) = self.session.content_type()
                    && previous != content_type
                {
                    info!(
                        previous = %previous,
                        content_type = %content_type,
                        "Content type renegotiated"
                    );
                }
                self.session.set_content_type(content_type);
                self.session.set_call_id(call_id);
                None
            }
            InboundMessage::CallEnded {
                call_id,
                reason_code,
                reason,
            } => {
                info!(
                    call_id = %call_id,
                    reason_code = ?reason_code,
                    reason = %reason,
                    "Received call ended notification"
                );
                None
            }
            InboundMessage::AudioNotify {
                sequence_num,
                audio_data,
            } => {
                debug!(
                    sequence_num,
                    bytes = audio_data.len(),
                    "Received audio notification"
                );
                match self.session.content_type() {
                    Some(content_type) => Some(OutboundMessage::PlayAudio {
                        id: PLAY_AUDIO_ID.to_string(),
                        audio_data,
                        content_type: content_type.to_string(),
                        sequence_num,
                    }),
                    None => {
                        self.stats.protocol_anomalies += 1;
                        warn!(
                            sequence_num,
                            call_id = ?self.session.call_id(),
                            anomalies = self.stats.protocol_anomalies,
                            "Audio received before content type was negotiated, dropping frame"
                        );
                        None
                    }
                }
            }
            InboundMessage::DtmfEnd { digit } => {
                info!(digit = %digit, "Received DTMF end notification");
                Some(OutboundMessage::PressDtmf {
                    id: PRESS_DTMF_ID.to_string(),
                    digits: digit,
                    press_duration_ms: DTMF_PRESS_DURATION_MS,
                    break_duration_ms: DTMF_BREAK_DURATION_MS,
                    sequence_num: DTMF_SEQUENCE_NUM,
                })
            }
            InboundMessage::Other { kind } => {
                self.stats.unrecognized_messages += 1;
                info!(kind, "Ignoring unhandled platform message");
                None
            }
        }
    }

    fn record_sent(&mut self) {
        self.stats.responses_sent += 1;
    }
}

/// Message loop for one stream
pub struct StreamDispatcher<T> {
    transport: T,
    context: StreamContext,
}

impl<T: MessageTransport> StreamDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            context: StreamContext::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        self.context.session()
    }

    pub fn stats(&self) -> StreamStats {
        self.context.stats()
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run until the peer closes the stream or the transport fails.
    ///
    /// Returns the stream's counters on a normal close.
    pub async fn run(&mut self) -> StreamResult<StreamStats> {
        info!("Starting to handle IVR audio stream");

        loop {
            match self.step().await {
                Ok(Step::Continue) => {}
                Ok(Step::Finished) => {
                    let stats = self.stats();
                    info!(
                        call_id = ?self.session().call_id(),
                        messages_received = stats.messages_received,
                        responses_sent = stats.responses_sent,
                        protocol_anomalies = stats.protocol_anomalies,
                        unrecognized_messages = stats.unrecognized_messages,
                        "IVR audio stream completed"
                    );
                    return Ok(stats);
                }
                Err(e) => {
                    let stats = self.stats();
                    error!(
                        error = %e,
                        call_id = ?self.session().call_id(),
                        responses_sent = stats.responses_sent,
                        "IVR audio stream terminated"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Receive one notification, handle it and send its response.
    pub async fn step(&mut self) -> StreamResult<Step> {
        let processed = self.context.stats.messages_received;

        let message = match self.transport.receive_next().await {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(Step::Finished),
            Err(e) => return Err(StreamError::transport(e, processed)),
        };

        if let Some(response) = self.context.handle(message) {
            let kind = response.kind();
            self.transport
                .send(response)
                .await
                .map_err(|e| StreamError::transport(e, processed))?;
            self.context.record_sent();
            debug!(kind, "Sent response");
        }

        Ok(Step::Continue)
    }
}
