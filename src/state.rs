use std::time::{Duration, Instant};

use crate::keymap::Keymap;

/// All mutable session state, owned exclusively by the event loop.
///
/// The decode thread never touches this; it only delivers events through the
/// bridge, so no locking is needed anywhere.
pub struct State {
    /// The suggestion buffer. Append-only while streaming, freely editable
    /// once the stream ends.
    pub input: String,
    /// Byte offset of the cursor into `input`.
    pub input_cursor: usize,
    /// True from request issuance until end-of-stream is observed.
    pub is_streaming: bool,
    /// Last error banner text, cleared on regenerate.
    pub err: Option<String>,
    /// Completed suggestions, newest last. Feeds the ghost completion.
    pub suggestions: Vec<String>,
    /// Printed after terminal teardown when the session quits.
    pub farewell: Option<String>,
    pub spinner_frame: u64,
    /// Countdown target for the streaming banner.
    pub deadline: Option<Instant>,
    /// Seconds shown in the countdown; cached so ticks only dirty the
    /// screen when the displayed value changes.
    pub remaining_secs: u64,
    pub stream_timeout: Duration,
    pub dirty: bool,
    pub keymap: Keymap,
}

impl State {
    pub fn new(stream_timeout: Duration) -> Self {
        Self {
            input: String::new(),
            input_cursor: 0,
            // Streaming starts immediately after the first request is sent.
            is_streaming: true,
            err: None,
            suggestions: Vec::new(),
            farewell: None,
            spinner_frame: 0,
            deadline: None,
            remaining_secs: stream_timeout.as_secs(),
            stream_timeout,
            dirty: true,
            keymap: Keymap::new(),
        }
    }

    pub fn commit_message(&self) -> &str {
        &self.input
    }

    /// The newest prior suggestion the current buffer is a strict prefix of.
    /// Drives the ghost completion shown while reviewing.
    pub fn ghost_suggestion(&self) -> Option<&str> {
        if self.is_streaming {
            return None;
        }
        self.suggestions
            .iter()
            .rev()
            .find(|s| s.len() > self.input.len() && s.starts_with(&self.input))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        State::new(Duration::from_secs(15))
    }

    #[test]
    fn starts_streaming_with_empty_buffer() {
        let s = state();
        assert!(s.is_streaming);
        assert!(s.input.is_empty());
        assert!(s.err.is_none());
    }

    #[test]
    fn ghost_hidden_while_streaming() {
        let mut s = state();
        s.suggestions.push("Fix parser bug".into());
        assert!(s.ghost_suggestion().is_none());
        s.is_streaming = false;
        assert_eq!(s.ghost_suggestion(), Some("Fix parser bug"));
    }

    #[test]
    fn ghost_prefers_newest_matching_suggestion() {
        let mut s = state();
        s.is_streaming = false;
        s.suggestions.push("Fix parser bug".into());
        s.suggestions.push("Fix tokenizer".into());
        s.input = "Fix".into();
        assert_eq!(s.ghost_suggestion(), Some("Fix tokenizer"));
    }

    #[test]
    fn ghost_requires_strict_prefix() {
        let mut s = state();
        s.is_streaming = false;
        s.suggestions.push("Fix".into());
        s.input = "Fix".into();
        assert!(s.ghost_suggestion().is_none());
    }
}
