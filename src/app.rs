use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use cp_git::Repo;
use cp_llm::{CancelToken, CompletionRequest, LlamaClient, StreamEvent};

use crate::actions::{Action, ActionResult, apply_action};
use crate::bridge::{BridgePoll, StreamBridge};
use crate::constants::{EVENT_POLL_MS, IDLE_POLL_MS, RENDER_THROTTLE_MS, SPINNER_INTERVAL_MS};
use crate::events::handle_event;
use crate::logging::Logger;
use crate::state::State;
use crate::ui;

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub struct App {
    pub state: State,
    logger: Logger,
    llm: LlamaClient,
    repo: Repo,
    request: CompletionRequest,
    /// Spans the whole session; quitting fires it into the active stream.
    cancel: CancelToken,
    /// The live stream, if any. At most one exists at a time.
    bridge: Option<StreamBridge>,
    last_render_ms: u64,
    last_spinner_ms: u64,
}

impl App {
    pub fn new(llm: LlamaClient, repo: Repo, request: CompletionRequest, logger: Logger) -> Self {
        let state = State::new(llm.request_timeout());
        Self {
            state,
            logger,
            llm,
            repo,
            request,
            cancel: CancelToken::new(),
            bridge: None,
            last_render_ms: 0,
            last_spinner_ms: 0,
        }
    }

    pub fn farewell(&self) -> Option<&str> {
        self.state.farewell.as_deref()
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.start_stream();

        loop {
            let current_ms = now_ms();

            // === INPUT FIRST: handle key presses with minimal latency ===
            if event::poll(Duration::ZERO)? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    // Quit: fire the shared scope so the reader winds down
                    // within one pending-send attempt; dropping the bridge
                    // hangs up the channel as a second signal.
                    self.cancel.cancel();
                    self.bridge = None;
                    break;
                };
                if self.handle_action(action) {
                    break;
                }

                // Render immediately after input for instant feedback
                if self.state.dirty {
                    terminal.draw(|frame| ui::render(frame, &self.state))?;
                    self.state.dirty = false;
                    self.last_render_ms = current_ms;
                }
            }

            // === BACKGROUND: stream events and decorative ticks ===
            self.process_stream_events();
            self.update_spinner(current_ms);
            self.update_countdown();

            if self.state.dirty && current_ms.saturating_sub(self.last_render_ms) >= RENDER_THROTTLE_MS {
                terminal.draw(|frame| ui::render(frame, &self.state))?;
                self.state.dirty = false;
                self.last_render_ms = current_ms;
            }

            // Adaptive poll: responsive while streaming, cheap when idle
            let poll_ms = if self.state.is_streaming || self.state.dirty { EVENT_POLL_MS } else { IDLE_POLL_MS };
            let _ = event::poll(Duration::from_millis(poll_ms))?;
        }

        Ok(())
    }

    /// Returns true when the session should end.
    fn handle_action(&mut self, action: Action) -> bool {
        self.state.dirty = true;
        match apply_action(&mut self.state, action) {
            ActionResult::Nothing => false,
            ActionResult::StartStream => {
                self.logger.debug("regenerating suggestion");
                self.start_stream();
                false
            }
            ActionResult::Commit => self.run_commit(),
        }
    }

    fn start_stream(&mut self) {
        self.state.deadline = Some(Instant::now() + self.state.stream_timeout);
        self.state.remaining_secs = self.state.stream_timeout.as_secs();

        match self.llm.open_stream(self.cancel.clone(), self.request.clone()) {
            Ok(handle) => {
                self.bridge = Some(StreamBridge::new(handle));
            }
            Err(e) => {
                self.logger.error(&format!("failed to read from LLM: {e}"));
                // A failed open has no background task behind it. Record the
                // error and close out the attempt so regenerate is reachable.
                apply_action(&mut self.state, Action::StreamError(format!("failed to read from LLM: {e}")));
                apply_action(&mut self.state, Action::EndOfStream);
            }
        }
        self.state.dirty = true;
    }

    fn process_stream_events(&mut self) {
        loop {
            let poll = match self.bridge.as_mut() {
                Some(bridge) => bridge.poll(),
                None => return,
            };
            match poll {
                BridgePoll::Idle => return,
                BridgePoll::Event(StreamEvent::Data(data)) => {
                    if data.stop {
                        self.logger.debug("stream stop record received");
                    }
                    if !data.content.is_empty() {
                        apply_action(&mut self.state, Action::AppendDelta(data.content));
                    }
                }
                BridgePoll::Event(StreamEvent::Error(e)) => {
                    if e.is_cancelled() {
                        self.logger.debug("stream cancelled");
                    } else {
                        self.logger.error(&format!("stream error: {e}"));
                        apply_action(&mut self.state, Action::StreamError(e.to_string()));
                    }
                }
                BridgePoll::Closed => {
                    self.logger.debug("stream channel closed");
                    apply_action(&mut self.state, Action::EndOfStream);
                    self.bridge = None;
                }
            }
            self.state.dirty = true;
        }
    }

    fn update_spinner(&mut self, current_ms: u64) {
        if !self.state.is_streaming {
            return;
        }
        if current_ms.saturating_sub(self.last_spinner_ms) >= SPINNER_INTERVAL_MS {
            self.last_spinner_ms = current_ms;
            self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
            self.state.dirty = true;
        }
    }

    fn update_countdown(&mut self) {
        if !self.state.is_streaming {
            return;
        }
        if let Some(deadline) = self.state.deadline {
            let remaining = deadline.saturating_duration_since(Instant::now()).as_secs();
            if remaining != self.state.remaining_secs {
                self.state.remaining_secs = remaining;
                self.state.dirty = true;
            }
        }
    }

    /// Returns true when the commit succeeded and the session should end.
    fn run_commit(&mut self) -> bool {
        let message = self.state.commit_message().to_string();
        match self.repo.commit(&message) {
            Ok(()) => {
                self.logger.debug("commit succeeded");
                self.state.farewell = Some("Successfully committed ;)".to_string());
                self.cancel.cancel();
                true
            }
            Err(e) => {
                self.logger.error(&format!("failed to commit: {e}"));
                self.state.err = Some(format!("failed to commit: {e}"));
                false
            }
        }
    }
}
