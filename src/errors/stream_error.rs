//! Stream-level error types.
//!
//! Everything here is fatal to exactly one stream. Protocol anomalies
//! (audio before a content type was negotiated, unrecognized payloads) are not
//! errors and never surface through these types.

use thiserror::Error;

/// Failures reported by a [`MessageTransport`](crate::core::ivr::MessageTransport).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Reading the next inbound message failed
    #[error("Failed to receive message: {0}")]
    Receive(String),

    /// Writing an outbound message failed (peer gone or response stream closed)
    #[error("Failed to send message: {0}")]
    Send(String),
}

/// Terminal error of a dispatch loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("Transport error after {processed} message(s): {source}")]
    Transport {
        #[source]
        source: TransportError,
        /// Inbound messages fully processed before the failure
        processed: u64,
    },
}

impl StreamError {
    pub fn transport(source: TransportError, processed: u64) -> Self {
        Self::Transport { source, processed }
    }

    /// True if the failure happened while writing a response
    pub fn is_send_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                source: TransportError::Send(_),
                ..
            }
        )
    }
}

impl From<&StreamError> for tonic::Status {
    fn from(error: &StreamError) -> Self {
        tonic::Status::aborted(error.to_string())
    }
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_error_display() {
        let err = StreamError::transport(TransportError::Receive("reset".to_string()), 3);
        assert_eq!(
            err.to_string(),
            "Transport error after 3 message(s): Failed to receive message: reset"
        );
        assert!(!err.is_send_failure());
    }

    #[test]
    fn test_send_failure_maps_to_aborted_status() {
        let err = StreamError::transport(TransportError::Send("closed".to_string()), 0);
        assert!(err.is_send_failure());

        let status = tonic::Status::from(&err);
        assert_eq!(status.code(), tonic::Code::Aborted);
        assert!(status.message().contains("closed"));
    }
}
