//! Pull-side adapter between the stream reader's bounded channel and the
//! single-threaded event loop.
//!
//! The loop never blocks on the channel: it polls between input rounds and
//! gets back at most one event per call. Channel closure is surfaced as an
//! explicit `Closed` exactly once, so the session can tell "stream over"
//! from "still waiting", and nothing can be observed after it.

use std::sync::mpsc::TryRecvError;

use cp_llm::{StreamEvent, StreamHandle};

#[derive(Debug)]
pub enum BridgePoll {
    /// Nothing available yet; the stream is still live.
    Idle,
    /// One event, in production order. Never coalesced.
    Event(StreamEvent),
    /// The reader closed the channel. Reported exactly once per stream.
    Closed,
}

pub struct StreamBridge {
    handle: StreamHandle,
    closed: bool,
}

impl StreamBridge {
    pub fn new(handle: StreamHandle) -> Self {
        Self { handle, closed: false }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn poll(&mut self) -> BridgePoll {
        if self.closed {
            return BridgePoll::Idle;
        }
        match self.handle.events.try_recv() {
            Ok(event) => BridgePoll::Event(event),
            Err(TryRecvError::Empty) => BridgePoll::Idle,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                BridgePoll::Closed
            }
        }
    }
}
