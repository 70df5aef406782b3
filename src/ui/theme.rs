use ratatui::style::Color;

// Primary brand colors
pub const ACCENT: Color = Color::Rgb(218, 118, 89); // #DA7659 - warm orange
pub const SUCCESS: Color = Color::Rgb(134, 188, 111); // Soft green
pub const ERROR: Color = Color::Rgb(224, 108, 117); // Soft red

// Text colors
pub const TEXT: Color = Color::Rgb(240, 240, 240); // #f0f0f0 - primary text
pub const TEXT_MUTED: Color = Color::Rgb(144, 144, 144); // #909090 - muted text

// Background colors
pub const BG_BASE: Color = Color::Rgb(34, 34, 32); // #222220 - darkest background
pub const BG_INPUT: Color = Color::Rgb(58, 58, 56); // #3a3a38 - input field

// Border colors
pub const BORDER: Color = Color::Rgb(66, 66, 64); // Subtle border
pub const BORDER_FOCUS: Color = Color::Rgb(218, 118, 89); // Accent color for focus
