#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts shared by tactics front-ends.
//!
//! Nothing in this crate draws. It turns a [`tactics_session::Session`] into a
//! [`Scene`] that a backend can paint, using colours and labels from a
//! [`Theme`].

mod scene;
mod theme;

pub use scene::{
    EndTurnButton, HighlightSprite, HoverOverlay, HoverUnit, MinimapScene, PlayerStatus, Scene,
    StatusBar, TerrainTile, UnitSprite,
};
pub use theme::{Theme, ThemeError, THEME_VERSION};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Parses a `#rrggbb` hex string into an opaque color.
    ///
    /// Returns `None` when the string is not exactly six hex digits after the
    /// leading `#`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::from_rgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Byte RGB channels, rounded to the nearest value.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [self.red, self.green, self.blue].map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Blends towards white; `amount` is clamped to 0.0..=1.0 and alpha is kept.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let towards_white = |channel: f32| channel + (1.0 - channel) * amount;
        Self::new(
            towards_white(self.red),
            towards_white(self.green),
            towards_white(self.blue),
            self.alpha,
        )
    }
}
