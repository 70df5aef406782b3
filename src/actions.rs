//! Session state transitions. `apply_action` is the single place state
//! changes; the app loop performs whatever side effect the result names.

use std::time::Instant;

use crate::state::State;

#[derive(Debug)]
pub enum Action {
    // Buffer editing. Reviewing only; the event layer locks input while
    // streaming.
    InputChar(char),
    InputBackspace,
    InputDelete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    AcceptSuggestion,
    // Bound keys
    Commit,
    Regenerate,
    // Stream events
    AppendDelta(String),
    StreamError(String),
    EndOfStream,
    None,
}

#[derive(Debug, PartialEq)]
pub enum ActionResult {
    Nothing,
    /// Open a fresh stream for the current request.
    StartStream,
    /// Gating passed; run the commit against the repository.
    Commit,
}

pub fn apply_action(state: &mut State, action: Action) -> ActionResult {
    match action {
        Action::None => ActionResult::Nothing,

        Action::InputChar(c) => {
            state.input.insert(state.input_cursor, c);
            state.input_cursor += c.len_utf8();
            ActionResult::Nothing
        }
        Action::InputBackspace => {
            if state.input_cursor > 0 {
                let prev = state.input[..state.input_cursor].char_indices().last().map(|(i, _)| i).unwrap_or(0);
                state.input.remove(prev);
                state.input_cursor = prev;
            }
            ActionResult::Nothing
        }
        Action::InputDelete => {
            if state.input_cursor < state.input.len() {
                state.input.remove(state.input_cursor);
            }
            ActionResult::Nothing
        }
        Action::CursorLeft => {
            if state.input_cursor > 0 {
                state.input_cursor =
                    state.input[..state.input_cursor].char_indices().last().map(|(i, _)| i).unwrap_or(0);
            }
            ActionResult::Nothing
        }
        Action::CursorRight => {
            if state.input_cursor < state.input.len() {
                let step = state.input[state.input_cursor..].chars().next().map(char::len_utf8).unwrap_or(0);
                state.input_cursor += step;
            }
            ActionResult::Nothing
        }
        Action::CursorHome => {
            state.input_cursor = 0;
            ActionResult::Nothing
        }
        Action::CursorEnd => {
            state.input_cursor = state.input.len();
            ActionResult::Nothing
        }
        Action::AcceptSuggestion => {
            if let Some(suggestion) = state.ghost_suggestion().map(str::to_string) {
                state.input = suggestion;
                state.input_cursor = state.input.len();
            }
            ActionResult::Nothing
        }

        Action::Commit => {
            // Commit is reachable only while reviewing a non-empty buffer.
            if state.is_streaming {
                return ActionResult::Nothing;
            }
            if state.commit_message().is_empty() {
                state.err = Some("cannot commit empty message".to_string());
                return ActionResult::Nothing;
            }
            ActionResult::Commit
        }
        Action::Regenerate => {
            // No overlapping streams: the previous one must have fully
            // terminated before a new request goes out.
            if state.is_streaming {
                return ActionResult::Nothing;
            }
            state.input.clear();
            state.input_cursor = 0;
            state.err = None;
            state.spinner_frame = 0;
            state.is_streaming = true;
            state.deadline = Some(Instant::now() + state.stream_timeout);
            state.remaining_secs = state.stream_timeout.as_secs();
            ActionResult::StartStream
        }

        Action::AppendDelta(text) => {
            state.input.push_str(&text);
            state.input_cursor = state.input.len();
            ActionResult::Nothing
        }
        Action::StreamError(msg) => {
            // Advisory: the stream itself ends only when the channel closes.
            state.err = Some(msg);
            ActionResult::Nothing
        }
        Action::EndOfStream => {
            state.is_streaming = false;
            state.deadline = None;
            if !state.input.is_empty() {
                state.suggestions.push(state.input.clone());
            }
            ActionResult::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> State {
        State::new(Duration::from_secs(15))
    }

    fn reviewing() -> State {
        let mut s = state();
        apply_action(&mut s, Action::EndOfStream);
        s
    }

    #[test]
    fn deltas_concatenate_in_order() {
        let mut s = state();
        for delta in ["Fix ", "bug", ""] {
            apply_action(&mut s, Action::AppendDelta(delta.to_string()));
        }
        apply_action(&mut s, Action::EndOfStream);

        assert_eq!(s.input, "Fix bug");
        assert!(!s.is_streaming);
        assert_eq!(s.suggestions, vec!["Fix bug"]);
    }

    #[test]
    fn stream_error_keeps_accumulated_buffer() {
        let mut s = state();
        apply_action(&mut s, Action::AppendDelta("Fix ".to_string()));
        apply_action(&mut s, Action::StreamError("Parse error: bad line".to_string()));
        apply_action(&mut s, Action::AppendDelta("bug".to_string()));

        assert_eq!(s.input, "Fix bug");
        assert!(s.is_streaming, "an error event alone does not end the stream");
        assert_eq!(s.err.as_deref(), Some("Parse error: bad line"));
    }

    #[test]
    fn commit_gating_across_all_states() {
        // (streaming, buffer) → expected reachability
        for (streaming, buffer, reachable) in [
            (true, "", false),
            (true, "Fix bug", false),
            (false, "", false),
            (false, "Fix bug", true),
        ] {
            let mut s = state();
            s.is_streaming = streaming;
            s.input = buffer.to_string();
            let result = apply_action(&mut s, Action::Commit);
            assert_eq!(
                result == ActionResult::Commit,
                reachable,
                "streaming={streaming} buffer={buffer:?}"
            );
        }
    }

    #[test]
    fn empty_commit_sets_error() {
        let mut s = reviewing();
        apply_action(&mut s, Action::Commit);
        assert_eq!(s.err.as_deref(), Some("cannot commit empty message"));
    }

    #[test]
    fn regenerate_while_streaming_is_a_noop() {
        let mut s = state();
        apply_action(&mut s, Action::AppendDelta("partial".to_string()));

        let result = apply_action(&mut s, Action::Regenerate);

        assert_eq!(result, ActionResult::Nothing);
        assert_eq!(s.input, "partial");
        assert!(s.is_streaming);
    }

    #[test]
    fn regenerate_resets_session_for_a_fresh_stream() {
        let mut s = state();
        apply_action(&mut s, Action::AppendDelta("old suggestion".to_string()));
        apply_action(&mut s, Action::StreamError("boom".to_string()));
        apply_action(&mut s, Action::EndOfStream);

        let result = apply_action(&mut s, Action::Regenerate);

        assert_eq!(result, ActionResult::StartStream);
        assert!(s.input.is_empty());
        assert!(s.err.is_none());
        assert!(s.is_streaming);
        assert!(s.deadline.is_some());
        // The aborted attempt's text stays available as a suggestion.
        assert_eq!(s.suggestions, vec!["old suggestion"]);
    }

    #[test]
    fn end_of_stream_skips_empty_snapshot() {
        let mut s = state();
        apply_action(&mut s, Action::EndOfStream);
        assert!(s.suggestions.is_empty());
    }

    #[test]
    fn editing_respects_char_boundaries() {
        let mut s = reviewing();
        for c in "héllo".chars() {
            apply_action(&mut s, Action::InputChar(c));
        }
        apply_action(&mut s, Action::InputBackspace);
        assert_eq!(s.input, "héll");

        apply_action(&mut s, Action::CursorHome);
        apply_action(&mut s, Action::CursorRight);
        apply_action(&mut s, Action::CursorRight);
        apply_action(&mut s, Action::InputDelete);
        assert_eq!(s.input, "hél");
    }

    #[test]
    fn accept_suggestion_completes_the_buffer() {
        let mut s = reviewing();
        s.suggestions.push("Fix parser bug".to_string());
        s.input = "Fix p".to_string();
        s.input_cursor = s.input.len();

        apply_action(&mut s, Action::AcceptSuggestion);

        assert_eq!(s.input, "Fix parser bug");
        assert_eq!(s.input_cursor, s.input.len());
    }
}
