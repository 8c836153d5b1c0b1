//! Overlay look: colours and opacities, and how they turn into CSS.
//!
//! Style is kept structured ([`StyleState`]) and every visual string is
//! derived from it on demand; rendered CSS is never parsed back.

use crate::settings::{SettingsStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB colour, exchanged with the UI as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` with the given alpha, rounded to two decimals.
    pub fn css_rgba(self, alpha: Proportion) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, alpha.value())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rgb` and `#rrggbb` (the `#` is optional, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(hex[i..=i].repeat(2).as_str());
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("'{0}' is not a #rgb or #rrggbb colour")]
    InvalidHex(String),
}

/// A value in `[0, 1]`. Out-of-range input is clamped; NaN becomes opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Proportion(f64);

impl Proportion {
    pub const OPAQUE: Self = Self(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::OPAQUE
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Maps a 0–100 slider position onto 0.0–1.0.
    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f64> for Proportion {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Proportion> for f64 {
    fn from(value: Proportion) -> Self {
        value.0
    }
}

/// Current overlay look. `text_transparency` is the alpha applied to
/// message text (1.0 = fully visible).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleState {
    pub background_color: Rgb,
    pub text_color: Rgb,
    pub window_opacity: Proportion,
    pub text_transparency: Proportion,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            background_color: Rgb::new(0x1e, 0x1e, 0x1e),
            text_color: Rgb::new(0xf5, 0xf5, 0xf5),
            window_opacity: Proportion::new(0.92),
            text_transparency: Proportion::OPAQUE,
        }
    }
}

/// One independently persisted style preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleField {
    BackgroundColor,
    TextColor,
    WindowOpacity,
    TextTransparency,
}

impl StyleField {
    pub const ALL: [StyleField; 4] = [
        StyleField::BackgroundColor,
        StyleField::TextColor,
        StyleField::WindowOpacity,
        StyleField::TextTransparency,
    ];

    /// Preference key in the settings store.
    pub const fn key(self) -> &'static str {
        match self {
            StyleField::BackgroundColor => "overlay.backgroundColor",
            StyleField::TextColor => "overlay.textColor",
            StyleField::WindowOpacity => "overlay.opacity",
            StyleField::TextTransparency => "overlay.textTransparency",
        }
    }
}

impl StyleState {
    /// Loads each preference key, keeping the built-in default for any key
    /// that is unset or holds a value of the wrong shape.
    pub fn from_preferences(store: &dyn SettingsStore) -> Self {
        let mut style = Self::default();
        for field in StyleField::ALL {
            let value = match store.preference(field.key()) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("[OVERLAY] Could not read {}: {}", field.key(), e);
                    continue;
                }
            };
            if let Err(e) = style.apply_value(field, value) {
                log::warn!("[OVERLAY] Ignoring stored {}: {}", field.key(), e);
            }
        }
        style
    }

    fn apply_value(&mut self, field: StyleField, value: serde_json::Value) -> Result<(), serde_json::Error> {
        match field {
            StyleField::BackgroundColor => self.background_color = serde_json::from_value(value)?,
            StyleField::TextColor => self.text_color = serde_json::from_value(value)?,
            StyleField::WindowOpacity => self.window_opacity = serde_json::from_value(value)?,
            StyleField::TextTransparency => self.text_transparency = serde_json::from_value(value)?,
        }
        Ok(())
    }

    pub fn field_value(&self, field: StyleField) -> serde_json::Value {
        match field {
            StyleField::BackgroundColor => serde_json::Value::from(self.background_color.to_hex()),
            StyleField::TextColor => serde_json::Value::from(self.text_color.to_hex()),
            StyleField::WindowOpacity => serde_json::Value::from(self.window_opacity.value()),
            StyleField::TextTransparency => serde_json::Value::from(self.text_transparency.value()),
        }
    }

    /// Writes one field under its own key.
    pub fn persist(&self, field: StyleField, store: &dyn SettingsStore) -> Result<(), StoreError> {
        store.set_preference(field.key(), self.field_value(field))
    }

    /// The visual a message takes under this style.
    pub fn paint(&self) -> Paint {
        Paint {
            background: self.background_color.css_rgba(self.window_opacity),
            color: self.text_color.css_rgba(self.text_transparency),
        }
    }
}

/// Computed CSS colours for one message bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paint {
    pub background: String,
    pub color: String,
}

/// Window-level style plus the values the overlay's controls display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStyle {
    pub backdrop: String,
    pub background_color: String,
    pub text_color: String,
    pub opacity_percent: u8,
    pub text_transparency_percent: u8,
}

impl From<&StyleState> for WindowStyle {
    fn from(style: &StyleState) -> Self {
        Self {
            backdrop: style.background_color.css_rgba(style.window_opacity),
            background_color: style.background_color.to_hex(),
            text_color: style.text_color.to_hex(),
            opacity_percent: style.window_opacity.percent(),
            text_transparency_percent: style.text_transparency.percent(),
        }
    }
}
