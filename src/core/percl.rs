//! PerCL call-control documents
//!
//! The platform asks the webhook service what to do with an inbound call and
//! expects a JSON array of PerCL commands back. Only `AudioStream` is needed
//! here: it tells the platform to open the gRPC audio stream to the relay.

use serde::Serialize;

/// One PerCL command, serialized as `{"<CommandName>": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PerclCommand {
    AudioStream(AudioStream),
}

/// Open a bidirectional audio stream for the call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub location: StreamLocation,
    pub content_type: String,
    /// Where the platform reports the outcome of the stream
    pub action_url: String,
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamLocation {
    pub uri: String,
}

/// Build the document answering `/inbound`.
///
/// `webhook_host` is the public base URL of the webhook service; a trailing
/// slash is dropped before `/callback` is appended.
pub fn audio_stream_document(
    audio_stream_host: &str,
    webhook_host: &str,
    content_type: &str,
    metadata: &[String],
) -> Vec<PerclCommand> {
    vec![PerclCommand::AudioStream(AudioStream {
        location: StreamLocation {
            uri: audio_stream_host.to_string(),
        },
        content_type: content_type.to_string(),
        action_url: format!("{}/callback", webhook_host.trim_end_matches('/')),
        metadata: metadata.to_vec(),
    })]
}
