// =============================================================================
// SAMPLING
// =============================================================================

/// Sampling temperature for the one-shot commit prompt
pub const TEMPERATURE: f32 = 0.5;

/// Maximum tokens the model may spend on a suggestion
pub const N_PREDICT: i32 = 512;

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval while streaming or dirty (milliseconds)
pub const EVENT_POLL_MS: u64 = 8;

/// Poll interval when idle (milliseconds)
pub const IDLE_POLL_MS: u64 = 50;

/// Minimum time between renders (milliseconds, caps at ~28fps)
pub const RENDER_THROTTLE_MS: u64 = 36;

/// Spinner animation interval (milliseconds)
pub const SPINNER_INTERVAL_MS: u64 = 100;
