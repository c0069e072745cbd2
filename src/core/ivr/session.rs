//! Per-stream session state.
//!
//! One [`SessionState`] exists per accepted stream and is owned by that
//! stream's dispatcher. It is never shared between streams and never outlives
//! the stream.

/// Mutable state for a single audio stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    content_type: String,
    call_id: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the negotiated content type. Always overwrites; the most recent
    /// call-started notification wins.
    pub fn set_content_type(&mut self, value: impl Into<String>) {
        self.content_type = value.into();
    }

    /// The negotiated content type, or `None` until a non-empty one arrives
    pub fn content_type(&self) -> Option<&str> {
        if self.content_type.is_empty() {
            None
        } else {
            Some(self.content_type.as_str())
        }
    }

    pub fn set_call_id(&mut self, call_id: impl Into<String>) {
        self.call_id = Some(call_id.into());
    }

    /// Call id from the latest call-started notification (log context only)
    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_content_type() {
        let state = SessionState::new();
        assert_eq!(state.content_type(), None);
        assert_eq!(state.call_id(), None);
    }

    #[test]
    fn test_last_content_type_wins() {
        let mut state = SessionState::new();
        state.set_content_type("audio/mulaw;rate=8000");
        state.set_content_type("audio/l16;rate=16000");
        assert_eq!(state.content_type(), Some("audio/l16;rate=16000"));
    }

    #[test]
    fn test_empty_content_type_reads_as_unset() {
        let mut state = SessionState::new();
        state.set_content_type("audio/mulaw");
        state.set_content_type("");
        assert_eq!(state.content_type(), None);
    }
}
