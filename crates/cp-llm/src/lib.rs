//! Client for a llama.cpp-style `/completion` endpoint.
//!
//! One request per stream. The response body is decoded on a background
//! thread into discrete [`StreamEvent`]s pushed onto a bounded channel, so a
//! slow consumer throttles the producer instead of growing a buffer.

mod cancel;
mod error;
mod types;

pub use cancel::CancelToken;
pub use error::LlmError;
pub use types::{CompletionRequest, StreamData, StreamEvent};

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};
use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

/// Event-line prefix used by llama-server streaming responses.
const EVENT_PREFIX_LEN: usize = "data: ".len();

/// Bounded channel capacity between the decode thread and the consumer.
pub const STREAM_CAPACITY: usize = 10;

/// Pause between send attempts while the channel is full. Bounds how long a
/// blocked producer takes to observe cancellation.
const SEND_RETRY_INTERVAL: Duration = Duration::from_millis(5);

pub struct LlamaClient {
    url: String,
    client: Client,
    request_timeout: Duration,
}

/// A live streaming exchange.
///
/// Dropping the handle disconnects the channel, which terminates the decode
/// thread on its next send attempt.
pub struct StreamHandle {
    pub events: Receiver<StreamEvent>,
}

impl LlamaClient {
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { url: url.into(), client, request_timeout })
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Send one completion request and start decoding its streamed response.
    ///
    /// Connection failures and non-success statuses are reported here,
    /// synchronously; no thread or channel exists for a failed open. The
    /// reader never retries; restarting is the caller's decision.
    pub fn open_stream(
        &self,
        cancel: CancelToken,
        mut request: CompletionRequest,
    ) -> Result<StreamHandle, LlmError> {
        request.stream = true;

        let response =
            self.client.post(&self.url).header("Content-Type", "application/json").json(&request).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let (tx, rx) = sync_channel(STREAM_CAPACITY);

        thread::spawn(move || {
            decode_loop(response, &tx, &cancel);
            // tx drops here, closing the channel: the single signal the
            // consumer uses to tell "stream over" from "still waiting".
        });

        Ok(StreamHandle { events: rx })
    }
}

fn decode_loop(response: Response, tx: &SyncSender<StreamEvent>, cancel: &CancelToken) {
    let reader = BufReader::new(response);

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // Read errors also cover the client-side request timeout.
                let _ = offer(tx, cancel, StreamEvent::Error(LlmError::StreamRead(e.to_string())));
                return;
            }
        };

        let Some(event) = parse_stream_line(&line) else { continue };
        if !offer(tx, cancel, event) {
            return;
        }
    }
}

/// Decode one response line.
///
/// Lines no longer than the event prefix (keep-alives, blanks) yield nothing.
/// A malformed payload yields a parse error event; the stream itself keeps
/// going, so later valid lines are still decoded.
fn parse_stream_line(line: &str) -> Option<StreamEvent> {
    if line.len() <= EVENT_PREFIX_LEN {
        return None;
    }
    match serde_json::from_str::<StreamData>(&line[EVENT_PREFIX_LEN..]) {
        Ok(data) => Some(StreamEvent::Data(data)),
        Err(e) => Some(StreamEvent::Error(LlmError::Parse(e.to_string()))),
    }
}

/// Offer one event to the bounded channel, waiting while it is full.
///
/// Returns false when the producer must stop: the consumer hung up, or the
/// cancellation scope fired. On cancellation the pending event is abandoned
/// and a final `Cancelled` event is enqueued if there is room for it.
fn offer(tx: &SyncSender<StreamEvent>, cancel: &CancelToken, event: StreamEvent) -> bool {
    let mut pending = event;
    loop {
        if cancel.is_cancelled() {
            let _ = tx.try_send(StreamEvent::Error(LlmError::Cancelled));
            return false;
        }
        match tx.try_send(pending) {
            Ok(()) => return true,
            Err(TrySendError::Full(event)) => {
                pending = event;
                thread::sleep(SEND_RETRY_INTERVAL);
            }
            Err(TrySendError::Disconnected(_)) => return false,
        }
    }
}
