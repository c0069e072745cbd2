pub mod ivr;
pub mod percl;

pub use ivr::{InboundMessage, OutboundMessage, SessionState, StreamDispatcher};
pub use percl::{PerclCommand, audio_stream_document};
