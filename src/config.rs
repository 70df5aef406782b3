//! CLI surface. Everything past startup consumes only the assembled
//! completion request and the timeout; the flags stop mattering once the
//! session is running.

use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "commit-pilot", version, about = "Generate a commit message for staged changes with a locally hosted model")]
pub struct Cli {
    /// Enable debug logs
    #[arg(short = 'l', long)]
    pub log: bool,

    /// Directory where to write logs. By default /tmp and /tmp/var are tried
    #[arg(short = 'd', long, value_name = "DIR")]
    pub log_directory: Option<String>,

    /// URL of the model's completion endpoint
    #[arg(
        short = 'e',
        long,
        env = "MODEL_ENDPOINT",
        value_name = "URL",
        default_value = "http://127.0.0.1:8080/completion"
    )]
    pub model_endpoint: String,

    /// Seconds the model gets to respond with results
    #[arg(short = 't', long, value_name = "SECS", default_value_t = 15)]
    pub timeout: u64,

    /// Prompt format the model was tuned for
    #[arg(short = 'm', long, default_value = "mistral", value_parser = parse_model_type)]
    pub model_type: String,
}

impl Cli {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn parse_model_type(value: &str) -> Result<String, String> {
    if cp_prompt::get(value).is_some() {
        Ok(value.to_string())
    } else {
        Err(format!("unknown model type '{}', expected one of: {}", value, cp_prompt::model_types().join(", ")))
    }
}
