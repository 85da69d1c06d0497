//! Player colours and labels loaded from a TOML theme file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tactics_core::PlayerId;
use thiserror::Error;

use crate::Color;

/// Theme file format version understood by [`Theme::from_toml_str`].
pub const THEME_VERSION: u32 = 1;

/// Errors raised while interpreting theme contents.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The contents were not valid TOML for the theme schema.
    #[error("theme is not valid TOML")]
    Syntax(#[from] toml::de::Error),
    /// The file declares a version this build does not understand.
    #[error("unsupported theme version {found}; expected {}", THEME_VERSION)]
    UnsupportedVersion {
        /// Version declared by the file.
        found: u32,
    },
    /// A colour entry was not a `#rrggbb` string.
    #[error("colour `{key}` must be a #rrggbb hex string, got `{value}`")]
    InvalidColor {
        /// Name of the offending entry.
        key: &'static str,
        /// Value found in the file.
        value: String,
    },
    /// A label was empty after trimming.
    #[error("label `{key}` must not be empty")]
    EmptyLabel {
        /// Name of the offending entry.
        key: &'static str,
    },
}

/// Presentation settings bound to engine state.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    player_one: Color,
    player_two: Color,
    reachable: Color,
    enemy: Color,
    end_turn_label: String,
    moved_opacity: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            player_one: Color::from_rgb_u8(0x44, 0x88, 0xff),
            player_two: Color::from_rgb_u8(0xff, 0x44, 0x88),
            reachable: Color::from_rgb_u8(0x33, 0x66, 0xff).with_alpha(0.35),
            enemy: Color::from_rgb_u8(0xff, 0x33, 0x33).with_alpha(0.45),
            end_turn_label: "End Turn".to_owned(),
            moved_opacity: 0.4,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    version: u32,
    #[serde(default)]
    colors: ColorsSection,
    #[serde(default)]
    labels: LabelsSection,
    #[serde(default)]
    units: UnitsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorsSection {
    player_one: Option<String>,
    player_two: Option<String>,
    reachable: Option<String>,
    enemy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelsSection {
    end_turn_button: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitsSection {
    moved_opacity: Option<f32>,
}

impl Theme {
    /// Parses theme contents; missing entries fall back to [`Theme::default`].
    pub fn from_toml_str(contents: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(contents)?;
        if file.version != THEME_VERSION {
            return Err(ThemeError::UnsupportedVersion {
                found: file.version,
            });
        }

        let defaults = Self::default();
        // Highlight entries keep the default translucency.
        let highlight = |key: &'static str, value: Option<String>, fallback: Color| {
            parse_color(key, value, fallback).map(|color| color.with_alpha(fallback.alpha))
        };

        let end_turn_label = match file.labels.end_turn_button {
            Some(label) if label.trim().is_empty() => {
                return Err(ThemeError::EmptyLabel {
                    key: "end_turn_button",
                })
            }
            Some(label) => label,
            None => defaults.end_turn_label,
        };

        Ok(Self {
            player_one: parse_color("player_one", file.colors.player_one, defaults.player_one)?,
            player_two: parse_color("player_two", file.colors.player_two, defaults.player_two)?,
            reachable: highlight("reachable", file.colors.reachable, defaults.reachable)?,
            enemy: highlight("enemy", file.colors.enemy, defaults.enemy)?,
            end_turn_label,
            moved_opacity: file
                .units
                .moved_opacity
                .map_or(defaults.moved_opacity, |opacity| opacity.clamp(0.0, 1.0)),
        })
    }

    /// Reads and parses a theme file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse theme at {}", path.display()))
    }

    /// Display colour of a player's units and status entries.
    #[must_use]
    pub const fn player_color(&self, player: PlayerId) -> Color {
        match player {
            PlayerId::One => self.player_one,
            PlayerId::Two => self.player_two,
        }
    }

    /// Fill of reachable movement-range tiles.
    #[must_use]
    pub const fn reachable_color(&self) -> Color {
        self.reachable
    }

    /// Fill of enemy-occupied movement-range tiles.
    #[must_use]
    pub const fn enemy_color(&self) -> Color {
        self.enemy
    }

    /// Text of the end-turn button.
    #[must_use]
    pub fn end_turn_label(&self) -> &str {
        &self.end_turn_label
    }

    /// Opacity applied to units that already moved this turn.
    #[must_use]
    pub const fn moved_opacity(&self) -> f32 {
        self.moved_opacity
    }
}

fn parse_color(
    key: &'static str,
    value: Option<String>,
    fallback: Color,
) -> Result<Color, ThemeError> {
    match value {
        None => Ok(fallback),
        Some(value) => Color::from_hex(&value).ok_or(ThemeError::InvalidColor { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_uses_defaults() {
        let theme = Theme::from_toml_str("version = 1").expect("parse theme");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn overrides_replace_defaults() {
        let theme = Theme::from_toml_str(
            r##"
version = 1

[colors]
player_one = "#112233"
enemy = "#00ff00"

[labels]
end_turn_button = "Pass"

[units]
moved_opacity = 0.25
"##,
        )
        .expect("parse theme");

        assert_eq!(theme.player_color(PlayerId::One).to_rgb_u8(), [0x11, 0x22, 0x33]);
        assert_eq!(theme.player_color(PlayerId::Two), Theme::default().player_two);
        assert_eq!(theme.enemy_color().to_rgb_u8(), [0, 255, 0]);
        assert_eq!(theme.enemy_color().alpha, Theme::default().enemy.alpha);
        assert_eq!(theme.end_turn_label(), "Pass");
        assert_eq!(theme.moved_opacity(), 0.25);
    }

    #[test]
    fn version_mismatch_is_reported() {
        let error = Theme::from_toml_str("version = 2").expect_err("version 2 is unknown");
        assert!(matches!(error, ThemeError::UnsupportedVersion { found: 2 }));
    }

    #[test]
    fn bad_colour_names_the_entry() {
        let error = Theme::from_toml_str("version = 1\n[colors]\nplayer_two = \"pink\"\n")
            .expect_err("pink is not hex");
        assert_eq!(
            error.to_string(),
            "colour `player_two` must be a #rrggbb hex string, got `pink`"
        );
    }

    #[test]
    fn blank_label_is_rejected() {
        let error = Theme::from_toml_str("version = 1\n[labels]\nend_turn_button = \"  \"\n")
            .expect_err("blank label");
        assert!(matches!(error, ThemeError::EmptyLabel { .. }));
    }

    #[test]
    fn unknown_keys_are_syntax_errors() {
        let error = Theme::from_toml_str("version = 1\nbackground = \"#000000\"\n")
            .expect_err("unknown key");
        assert!(matches!(error, ThemeError::Syntax(_)));
    }
}
