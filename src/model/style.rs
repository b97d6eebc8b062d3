//! Presentation style replicated across both surfaces.

use super::error::StyleError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque sRGB color, `#rrggbb` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Color::rgb(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }

    /// This color with an alpha channel.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Color with alpha, used by draw operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

/// Style settings shared by the operator and mirror surfaces.
///
/// Changed only through explicit setting messages; never derived from
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationStyle {
    /// Font size as a percentage of viewport height.
    pub font_size_fraction: f64,
    /// Normal verse text color.
    pub text_color: Color,
    /// Canvas background.
    pub background_color: Color,
    /// Background tint of the highlighted verse (drawn at 30% alpha).
    pub highlight_background_color: Color,
    /// Text color of the highlighted verse.
    pub highlight_text_color: Color,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f64,
    /// Pin the title above the scroll region instead of scrolling it.
    pub fixed_title: bool,
    /// Wheel delta multiplier.
    pub scroll_speed: f64,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        Self {
            font_size_fraction: 8.0,
            text_color: Color::rgb(0xff, 0xff, 0xff),
            background_color: Color::rgb(0x00, 0x00, 0x00),
            highlight_background_color: Color::rgb(0x1e, 0x90, 0xff),
            highlight_text_color: Color::rgb(0xff, 0xff, 0x00),
            line_height_multiplier: 1.6,
            fixed_title: true,
            scroll_speed: 0.4,
        }
    }
}

/// Keys accepted by a `settingChanged` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// `fontSizeFraction`
    FontSizeFraction,
    /// `textColor`
    TextColor,
    /// `backgroundColor`
    BackgroundColor,
    /// `highlightBackgroundColor`
    HighlightBackgroundColor,
    /// `highlightTextColor`
    HighlightTextColor,
    /// `lineHeightMultiplier`
    LineHeightMultiplier,
    /// `fixedTitle`
    FixedTitle,
    /// `scrollSpeed`
    ScrollSpeed,
}

impl SettingKey {
    /// Every key, in declaration order.
    pub const ALL: [SettingKey; 8] = [
        SettingKey::FontSizeFraction,
        SettingKey::TextColor,
        SettingKey::BackgroundColor,
        SettingKey::HighlightBackgroundColor,
        SettingKey::HighlightTextColor,
        SettingKey::LineHeightMultiplier,
        SettingKey::FixedTitle,
        SettingKey::ScrollSpeed,
    ];

    /// Wire name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::FontSizeFraction => "fontSizeFraction",
            SettingKey::TextColor => "textColor",
            SettingKey::BackgroundColor => "backgroundColor",
            SettingKey::HighlightBackgroundColor => "highlightBackgroundColor",
            SettingKey::HighlightTextColor => "highlightTextColor",
            SettingKey::LineHeightMultiplier => "lineHeightMultiplier",
            SettingKey::FixedTitle => "fixedTitle",
            SettingKey::ScrollSpeed => "scrollSpeed",
        }
    }

    /// Whether changing this key invalidates block geometry.
    pub fn affects_layout(self) -> bool {
        matches!(
            self,
            SettingKey::FontSizeFraction | SettingKey::LineHeightMultiplier | SettingKey::FixedTitle
        )
    }
}

impl FromStr for SettingKey {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StyleError::UnknownKey(s.to_string()))
    }
}

impl PresentationStyle {
    /// Patch one field from a wire value.
    ///
    /// The style is left untouched when the value has the wrong type or is
    /// out of range.
    pub fn apply_setting(
        &mut self,
        key: SettingKey,
        value: &serde_json::Value,
    ) -> Result<(), StyleError> {
        let invalid = || StyleError::InvalidValue {
            key: key.as_str(),
            value: value.to_string(),
        };
        let positive = || {
            value
                .as_f64()
                .ok_or_else(invalid)
                .and_then(|v| positive_finite(key, v))
        };
        let color = || {
            value
                .as_str()
                .ok_or_else(invalid)
                .and_then(|s| s.parse::<Color>())
        };

        match key {
            SettingKey::FontSizeFraction => self.font_size_fraction = positive()?,
            SettingKey::LineHeightMultiplier => self.line_height_multiplier = positive()?,
            SettingKey::ScrollSpeed => self.scroll_speed = positive()?,
            SettingKey::FixedTitle => self.fixed_title = value.as_bool().ok_or_else(invalid)?,
            SettingKey::TextColor => self.text_color = color()?,
            SettingKey::BackgroundColor => self.background_color = color()?,
            SettingKey::HighlightBackgroundColor => self.highlight_background_color = color()?,
            SettingKey::HighlightTextColor => self.highlight_text_color = color()?,
        }
        Ok(())
    }

    /// Check the numeric fields a whole-style replacement could break.
    ///
    /// # Errors
    ///
    /// `InvalidValue` naming the first size or speed that is not positive and finite.
    pub fn validate(&self) -> Result<(), StyleError> {
        [
            (SettingKey::FontSizeFraction, self.font_size_fraction),
            (SettingKey::LineHeightMultiplier, self.line_height_multiplier),
            (SettingKey::ScrollSpeed, self.scroll_speed),
        ]
        .into_iter()
        .try_for_each(|(key, value)| positive_finite(key, value).map(drop))
    }

    /// Set the font size fraction, rejecting non-positive values.
    pub fn set_font_size_fraction(&mut self, size: f64) -> Result<(), StyleError> {
        self.apply_setting(SettingKey::FontSizeFraction, &serde_json::json!(size))
    }
}

fn positive_finite(key: SettingKey, value: f64) -> Result<f64, StyleError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StyleError::InvalidValue {
            key: key.as_str(),
            value: value.to_string(),
        })
    }
}
