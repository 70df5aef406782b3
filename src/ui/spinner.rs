const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Pick the spinner glyph for an animation frame counter.
pub fn spinner(frame: u64) -> &'static str {
    FRAMES[(frame % FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        assert_eq!(spinner(0), spinner(FRAMES.len() as u64));
        assert_ne!(spinner(0), spinner(1));
    }
}
