use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Subset of the options accepted by llama-server's `/completion` route.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    /// Maximum number of tokens to predict; `-1` means no limit.
    pub n_predict: i32,
    pub stream: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32, n_predict: i32) -> Self {
        Self { prompt: prompt.into(), temperature, n_predict, stream: true }
    }
}

/// One decoded record from a streamed completion response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamData {
    #[serde(default)]
    pub content: String,
    /// Set on the final record of a completion.
    #[serde(default)]
    pub stop: bool,
    /// Server slot the task was assigned to.
    #[serde(default)]
    pub id_slot: i64,
    #[serde(default)]
    pub multimodal: bool,
    /// Position of the record within the stream.
    #[serde(default)]
    pub index: i64,
}

/// What the decode thread hands the consumer: a record or a failure.
#[derive(Debug)]
pub enum StreamEvent {
    Data(StreamData),
    Error(LlmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_all_fields() {
        let req = CompletionRequest::new("hello", 0.5, 512);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["prompt"], "hello");
        assert_eq!(json["n_predict"], 512);
        assert_eq!(json["stream"], true);
    }

    #[test]
    fn stream_data_tolerates_missing_fields() {
        let data: StreamData = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert_eq!(data.content, "hi");
        assert!(!data.stop);
        assert_eq!(data.index, 0);
    }
}
