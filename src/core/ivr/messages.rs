//! IVR stream message model
//!
//! Typed views of the notifications the platform pushes over the audio stream
//! and the commands the relay sends back. Conversion from and to the protobuf
//! envelopes lives here as well; the conversions are pure and never fail.

use bytes::Bytes;

use crate::proto::{self, app_message, platform_message};

// =============================================================================
// Inbound (Platform -> App)
// =============================================================================

/// Why the platform ended a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallEndReason {
    Unspecified,
    CallerHangup,
    AppHangup,
    Timeout,
    Error,
    /// Code not known to this build
    Unknown(i32),
}

impl From<i32> for CallEndReason {
    fn from(code: i32) -> Self {
        match proto::ReasonCode::try_from(code) {
            Ok(proto::ReasonCode::Unspecified) => Self::Unspecified,
            Ok(proto::ReasonCode::CallerHangup) => Self::CallerHangup,
            Ok(proto::ReasonCode::AppHangup) => Self::AppHangup,
            Ok(proto::ReasonCode::Timeout) => Self::Timeout,
            Ok(proto::ReasonCode::Error) => Self::Error,
            Err(_) => Self::Unknown(code),
        }
    }
}

/// One classified notification from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Call answered; carries the negotiated audio content type
    CallStarted { call_id: String, content_type: String },

    CallEnded {
        call_id: String,
        reason_code: CallEndReason,
        reason: String,
    },

    /// One inbound audio frame
    AudioNotify { sequence_num: u64, audio_data: Bytes },

    /// A DTMF key press completed
    DtmfEnd { digit: String },

    /// Anything the relay does not act on. The label names what was received.
    Other { kind: &'static str },
}

impl InboundMessage {
    /// Short name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::CallStarted { .. } => "call_started",
            InboundMessage::CallEnded { .. } => "call_ended",
            InboundMessage::AudioNotify { .. } => "audio_notify",
            InboundMessage::DtmfEnd { .. } => "dtmf_end",
            InboundMessage::Other { kind } => *kind,
        }
    }
}

impl From<proto::PlatformMessage> for InboundMessage {
    fn from(message: proto::PlatformMessage) -> Self {
        use platform_message::Payload;

        match message.payload {
            Some(Payload::NotifyCallStarted(started)) => InboundMessage::CallStarted {
                call_id: started.call_id,
                content_type: started.content_type,
            },
            Some(Payload::NotifyCallEnded(ended)) => InboundMessage::CallEnded {
                call_id: ended.call_id,
                reason_code: CallEndReason::from(ended.reason_code),
                reason: ended.reason,
            },
            Some(Payload::NotifyAudioData(audio)) => InboundMessage::AudioNotify {
                sequence_num: audio.sequence_num,
                audio_data: audio.audio_data,
            },
            Some(Payload::NotifyDtmfReceivedEndData(dtmf)) => {
                InboundMessage::DtmfEnd { digit: dtmf.digit }
            }
            Some(Payload::NotifyDtmfReceivedStartData(_)) => InboundMessage::Other {
                kind: "notify_dtmf_received_start",
            },
            None => InboundMessage::Other { kind: "unset" },
        }
    }
}

// =============================================================================
// Outbound (App -> Platform)
// =============================================================================

/// One command for the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Play an audio frame back into the call
    PlayAudio {
        id: String,
        audio_data: Bytes,
        content_type: String,
        sequence_num: u64,
    },

    /// Press DTMF digits into the call
    PressDtmf {
        id: String,
        digits: String,
        press_duration_ms: u32,
        break_duration_ms: u32,
        sequence_num: u64,
    },
}

impl OutboundMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::PlayAudio { .. } => "play_audio",
            OutboundMessage::PressDtmf { .. } => "press_dtmf",
        }
    }
}

impl From<OutboundMessage> for proto::AppMessage {
    fn from(message: OutboundMessage) -> Self {
        let payload = match message {
            OutboundMessage::PlayAudio {
                id,
                audio_data,
                content_type,
                sequence_num,
            } => app_message::Payload::AudioData(proto::PlayAudioMessage {
                id,
                audio_data,
                content_type,
                sequence_num,
            }),
            OutboundMessage::PressDtmf {
                id,
                digits,
                press_duration_ms,
                break_duration_ms,
                sequence_num,
            } => app_message::Payload::DtmfData(proto::PressDtmfMessage {
                id,
                dtmf_digits: digits,
                press_duration_ms,
                break_duration_ms,
                sequence_num,
            }),
        };

        proto::AppMessage {
            payload: Some(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(payload: platform_message::Payload) -> proto::PlatformMessage {
        proto::PlatformMessage {
            payload: Some(payload),
        }
    }

    #[test]
    fn test_classify_call_started() {
        let msg = InboundMessage::from(platform(
            platform_message::Payload::NotifyCallStarted(proto::NotifyCallStarted {
                call_id: "CA123".to_string(),
                content_type: "audio/mulaw;rate=8000".to_string(),
            }),
        ));

        assert_eq!(
            msg,
            InboundMessage::CallStarted {
                call_id: "CA123".to_string(),
                content_type: "audio/mulaw;rate=8000".to_string(),
            }
        );
        assert_eq!(msg.kind(), "call_started");
    }

    #[test]
    fn test_classify_call_ended_with_unknown_reason() {
        let msg = InboundMessage::from(platform(platform_message::Payload::NotifyCallEnded(
            proto::NotifyCallEnded {
                call_id: "CA123".to_string(),
                reason_code: 77,
                reason: "carrier said so".to_string(),
            },
        )));

        match msg {
            InboundMessage::CallEnded {
                reason_code,
                reason,
                ..
            } => {
                assert_eq!(reason_code, CallEndReason::Unknown(77));
                assert_eq!(reason, "carrier said so");
            }
            other => panic!("Expected CallEnded, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_audio_keeps_payload_bytes() {
        let data = Bytes::from_static(&[0xff, 0x7f, 0x00]);
        let msg = InboundMessage::from(platform(platform_message::Payload::NotifyAudioData(
            proto::NotifyAudioData {
                sequence_num: 42,
                audio_data: data.clone(),
            },
        )));

        assert_eq!(
            msg,
            InboundMessage::AudioNotify {
                sequence_num: 42,
                audio_data: data,
            }
        );
    }

    #[test]
    fn test_classify_dtmf_start_is_other() {
        let msg = InboundMessage::from(platform(
            platform_message::Payload::NotifyDtmfReceivedStartData(
                proto::NotifyDtmfReceivedStartData {
                    digit: "1".to_string(),
                },
            ),
        ));

        assert_eq!(
            msg,
            InboundMessage::Other {
                kind: "notify_dtmf_received_start"
            }
        );
    }

    #[test]
    fn test_classify_missing_payload_is_other() {
        let msg = InboundMessage::from(proto::PlatformMessage { payload: None });
        assert_eq!(msg, InboundMessage::Other { kind: "unset" });
        assert_eq!(msg.kind(), "unset");
    }

    #[test]
    fn test_call_end_reason_known_codes() {
        assert_eq!(CallEndReason::from(0), CallEndReason::Unspecified);
        assert_eq!(CallEndReason::from(1), CallEndReason::CallerHangup);
        assert_eq!(CallEndReason::from(4), CallEndReason::Error);
    }

    #[test]
    fn test_press_dtmf_to_wire() {
        let app = proto::AppMessage::from(OutboundMessage::PressDtmf {
            id: "echo".to_string(),
            digits: "#".to_string(),
            press_duration_ms: 100,
            break_duration_ms: 100,
            sequence_num: 1,
        });

        match app.payload {
            Some(app_message::Payload::DtmfData(dtmf)) => {
                assert_eq!(dtmf.dtmf_digits, "#");
                assert_eq!(dtmf.press_duration_ms, 100);
                assert_eq!(dtmf.sequence_num, 1);
            }
            other => panic!("Expected DtmfData, got {other:?}"),
        }
    }
}
