//! IVR audio stream core
//!
//! Message model, per-stream session state and the dispatch loop that sits
//! behind the platform's bidirectional audio stream. Nothing in here knows
//! about gRPC; the loop talks to a [`MessageTransport`].
//!
//! ## Usage
//!
//! ```ignore
//! use ivr_relay::core::ivr::StreamDispatcher;
//!
//! let mut dispatcher = StreamDispatcher::new(transport);
//! let stats = dispatcher.run().await?;
//! ```

mod dispatch;
mod messages;
mod session;

pub use dispatch::{
    DTMF_BREAK_DURATION_MS, DTMF_PRESS_DURATION_MS, DTMF_SEQUENCE_NUM, MessageTransport,
    PLAY_AUDIO_ID, PRESS_DTMF_ID, Step, StreamContext, StreamDispatcher, StreamStats,
};
pub use messages::{CallEndReason, InboundMessage, OutboundMessage};
pub use session::SessionState;
