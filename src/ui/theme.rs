// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Theme constants and styling for Emberwatch.

use iced::theme::Palette;
use iced::{Border, Color, Theme};

// ============================================================================
// Color Constants (Dark Theme)
// ============================================================================

/// Main background color.
pub const BACKGROUND: Color = Color::from_rgb(0.12, 0.12, 0.14);

/// Surface color for cards and panels.
pub const SURFACE: Color = Color::from_rgb(0.18, 0.18, 0.20);

/// Lighter surface for hover states and subtle borders.
pub const SURFACE_LIGHT: Color = Color::from_rgb(0.24, 0.24, 0.26);

/// Primary accent color (ember orange).
pub const PRIMARY: Color = Color::from_rgb(0.95, 0.55, 0.20);

/// Main text color.
pub const TEXT: Color = Color::from_rgb(0.90, 0.90, 0.92);

/// Dimmed text color.
pub const TEXT_DIM: Color = Color::from_rgb(0.60, 0.60, 0.65);

/// Error indicator (red).
pub const DANGER: Color = Color::from_rgb(0.85, 0.30, 0.30);

/// Success/connected indicator (green).
pub const SUCCESS: Color = Color::from_rgb(0.40, 0.75, 0.40);

/// Warning indicator (yellow).
pub const WARNING: Color = Color::from_rgb(0.90, 0.75, 0.20);

/// Reading below its low limit (the device front end's #1874CD).
pub const READING_LOW: Color = Color::from_rgb8(0x18, 0x74, 0xCD);

/// Reading above its high limit.
pub const READING_HIGH: Color = Color::from_rgb(0.90, 0.20, 0.20);

// ============================================================================
// Theme Palette
// ============================================================================

/// Create the Emberwatch dark theme palette.
pub const THEME_PALETTE: Palette = Palette {
    background: BACKGROUND,
    text: TEXT,
    primary: PRIMARY,
    success: SUCCESS,
    danger: DANGER,
    warning: WARNING,
};

/// Get the Emberwatch custom theme.
pub fn emberwatch_theme() -> Theme {
    Theme::custom("Emberwatch Dark".to_string(), THEME_PALETTE)
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Standard border radius for UI elements.
pub const BORDER_RADIUS: f32 = 6.0;

/// Small border radius.
pub const BORDER_RADIUS_SMALL: f32 = 4.0;

/// Standard spacing between elements.
pub const SPACING: f32 = 10.0;

/// Small spacing.
pub const SPACING_SMALL: f32 = 5.0;

/// Standard padding.
pub const PADDING: f32 = 15.0;

/// Channel card width.
pub const CHANNEL_CARD_WIDTH: f32 = 160.0;

/// Settings panel width.
pub const SETTINGS_PANEL_WIDTH: f32 = 380.0;

/// Create a standard border.
pub fn standard_border() -> Border {
    Border::default()
        .rounded(BORDER_RADIUS)
        .color(SURFACE_LIGHT)
        .width(1.0)
}

/// Parse a "#RRGGBB" palette key into a color.
///
/// The device palette only carries six-digit hex keys; anything else is
/// rejected and the caller falls back to a neutral border.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let blue = parse_hex_color("#0000ff").unwrap();
        assert_eq!(blue.b, 1.0);
        assert_eq!(blue.r, 0.0);

        let mixed = parse_hex_color("#1874CD").unwrap();
        assert!((mixed.r - 0x18 as f32 / 255.0).abs() < 1e-6);
        assert!((mixed.g - 0x74 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert_eq!(parse_hex_color("0000ff"), None);
        assert_eq!(parse_hex_color("#00f"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color(""), None);
    }
}
