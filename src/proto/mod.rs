//! Protobuf wire types for the IVR audio stream service.
//!
//! These types match the platform's `freeclimb` proto package. They are
//! declared directly with `prost` derives so the crate does not need a
//! `protoc` build step.
//!
//! ## gRPC Service Definition
//!
//! ```protobuf
//! service GRPCStreamService {
//!     rpc SendIVRData(stream PlatformMessage) returns (stream AppMessage);
//! }
//! ```

/// Fully-qualified gRPC service name
pub const SERVICE_NAME: &str = "freeclimb.GRPCStreamService";

/// gRPC method path for GRPCStreamService.SendIVRData
pub const SEND_IVR_DATA_PATH: &str = "/freeclimb.GRPCStreamService/SendIVRData";

// =============================================================================
// Platform -> App
// =============================================================================

/// Envelope for every notification pushed by the platform.
///
/// ```protobuf
/// message PlatformMessage {
///     oneof payload {
///         NotifyCallStarted notify_call_started = 1;
///         NotifyCallEnded notify_call_ended = 2;
///         NotifyAudioData notify_audio_data = 3;
///         NotifyDtmfReceivedStartData notify_dtmf_received_start_data = 4;
///         NotifyDtmfReceivedEndData notify_dtmf_received_end_data = 5;
///     }
/// }
/// ```
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlatformMessage {
    #[prost(oneof = "platform_message::Payload", tags = "1, 2, 3, 4, 5")]
    pub payload: ::core::option::Option<platform_message::Payload>,
}

pub mod platform_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "1")]
        NotifyCallStarted(super::NotifyCallStarted),
        #[prost(message, tag = "2")]
        NotifyCallEnded(super::NotifyCallEnded),
        #[prost(message, tag = "3")]
        NotifyAudioData(super::NotifyAudioData),
        #[prost(message, tag = "4")]
        NotifyDtmfReceivedStartData(super::NotifyDtmfReceivedStartData),
        #[prost(message, tag = "5")]
        NotifyDtmfReceivedEndData(super::NotifyDtmfReceivedEndData),
    }
}

/// Call has been answered and the audio stream negotiated
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotifyCallStarted {
    #[prost(string, tag = "1")]
    pub call_id: ::prost::alloc::string::String,
    /// Negotiated audio encoding, e.g. `audio/mulaw;rate=8000`
    #[prost(string, tag = "2")]
    pub content_type: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotifyCallEnded {
    #[prost(string, tag = "1")]
    pub call_id: ::prost::alloc::string::String,
    #[prost(enumeration = "ReasonCode", tag = "2")]
    pub reason_code: i32,
    #[prost(string, tag = "3")]
    pub reason: ::prost::alloc::string::String,
}

/// Why the platform ended the call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ReasonCode {
    Unspecified = 0,
    CallerHangup = 1,
    AppHangup = 2,
    Timeout = 3,
    Error = 4,
}

/// One inbound audio frame
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotifyAudioData {
    #[prost(uint64, tag = "1")]
    pub sequence_num: u64,
    #[prost(bytes = "bytes", tag = "2")]
    pub audio_data: ::prost::bytes::Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotifyDtmfReceivedStartData {
    #[prost(string, tag = "1")]
    pub digit: ::prost::alloc::string::String,
}

/// A DTMF key press has completed
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NotifyDtmfReceivedEndData {
    #[prost(string, tag = "1")]
    pub digit: ::prost::alloc::string::String,
}

// =============================================================================
// App -> Platform
// =============================================================================

/// Envelope for every command sent back to the platform.
///
/// ```protobuf
/// message AppMessage {
///     oneof payload {
///         PlayAudioMessage audio_data = 1;
///         PressDTMFMessage dtmf_data = 2;
///     }
/// }
/// ```
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AppMessage {
    #[prost(oneof = "app_message::Payload", tags = "1, 2")]
    pub payload: ::core::option::Option<app_message::Payload>,
}

pub mod app_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "1")]
        AudioData(super::PlayAudioMessage),
        #[prost(message, tag = "2")]
        DtmfData(super::PressDtmfMessage),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PlayAudioMessage {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(bytes = "bytes", tag = "2")]
    pub audio_data: ::prost::bytes::Bytes,
    #[prost(string, tag = "3")]
    pub content_type: ::prost::alloc::string::String,
    #[prost(uint64, tag = "4")]
    pub sequence_num: u64,
}

/// `PressDTMFMessage` on the wire
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PressDtmfMessage {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub dtmf_digits: ::prost::alloc::string::String,
    #[prost(uint32, tag = "3")]
    pub press_duration_ms: u32,
    #[prost(uint32, tag = "4")]
    pub break_duration_ms: u32,
    #[prost(uint64, tag = "5")]
    pub sequence_num: u64,
}
