// SPDX-License-Identifier: MIT
//
// Canonical color state and family-preserving serialization.
//
// A `Color` is four independently editable channels (hue, saturation,
// value, alpha) plus the representation family of the value it was
// built from. The family is what lets a picker bound to `{r, g, b}`
// write `{r, g, b}` back, while a picker bound to `"#ff8800"` writes a
// CSS string.
//
// Families and their written form:
//
//   Css          "#rrggbb" when opaque, "rgba(r,g,b,a)" otherwise
//   HexNumber    0xRRGGBB as a JSON integer (alpha dropped)
//   RgbArray     [r, g, b]
//   RgbaArray    [r, g, b, a]
//   RgbObject    {"r": .., "g": .., "b": ..}
//   RgbaObject   {"r": .., "g": .., "b": .., "a": ..}
//   HsvObject    {"h": .., "s": .., "v": ..}
//   HsvaObject   {"h": .., "s": .., "v": .., "a": ..}
//
// RGB channels written into arrays and objects are not rounded, so an
// RGB-family value reads back into the same HSV state up to float noise.
#![allow(clippy::many_single_char_names)]

use std::fmt;

use serde_json::{Map, Value, json};

use crate::convert::{channel_to_u8, hsv_to_rgb, normalize_hue, pack_rgb};
use crate::error::{ColorError, Result};
use crate::interpret::{Interpretation, interpret};

// ─── Format ──────────────────────────────────────────────────────────────────

/// The representation family a color value arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Any CSS color string (`#rgb`, `#rrggbb`, `rgb(..)`, `rgba(..)`).
    Css,
    /// A `0xRRGGBB` integer.
    HexNumber,
    /// `[r, g, b]`
    RgbArray,
    /// `[r, g, b, a]`
    RgbaArray,
    /// `{r, g, b}`
    RgbObject,
    /// `{r, g, b, a}`
    RgbaObject,
    /// `{h, s, v}`
    HsvObject,
    /// `{h, s, v, a}`
    HsvaObject,
}

impl Format {
    /// Whether values of this family carry an alpha channel.
    #[must_use]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Css | Self::RgbaArray | Self::RgbaObject | Self::HsvaObject)
    }

    /// Short lowercase name, used in logs and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::HexNumber => "hex",
            Self::RgbArray => "rgb-array",
            Self::RgbaArray => "rgba-array",
            Self::RgbObject => "rgb-object",
            Self::RgbaObject => "rgba-object",
            Self::HsvObject => "hsv-object",
            Self::HsvaObject => "hsva-object",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Hsva ────────────────────────────────────────────────────────────────────

/// The canonical channel state every color operation normalizes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Value (brightness), `[0, 1]`.
    pub v: f64,
    /// Alpha, `[0, 1]`.
    pub a: f64,
}

impl Hsva {
    /// Build a state, normalizing hue and clamping the other channels.
    #[must_use]
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque black.
    pub const BLACK: Self = Self { h: 0.0, s: 0.0, v: 0.0, a: 1.0 };
}

impl Default for Hsva {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A live, mutable color: canonical HSVA state plus the family it
/// serializes back into.
///
/// # Examples
///
/// ```
/// use knob_color::{Color, Format};
/// use serde_json::json;
///
/// let mut color = Color::from_value(&json!({"r": 255, "g": 0, "b": 0})).unwrap();
/// assert_eq!(color.format(), Some(Format::RgbObject));
///
/// color.set_v(0.5);
/// assert_eq!(color.to_css(), "#800000");
/// assert_eq!(color.to_value(), json!({"r": 127.5, "g": 0.0, "b": 0.0}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    state: Hsva,
    format: Option<Format>,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from a state with no recorded family.
    ///
    /// Such a color serializes as a CSS string.
    #[must_use]
    pub const fn new(state: Hsva) -> Self {
        Self { state, format: None }
    }

    /// Interpret an external value.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Unrecognized`] if the value is not one of the
    /// accepted representations.
    pub fn from_value(value: &Value) -> Result<Self> {
        interpret(value)
            .map(|i| Self::from_interpretation(&i))
            .ok_or_else(|| ColorError::Unrecognized(value.to_string()))
    }

    /// Build a color from an interpretation, defaulting absent channels
    /// (hue 0, alpha 1).
    #[must_use]
    pub fn from_interpretation(i: &Interpretation) -> Self {
        Self {
            state: Hsva::new(i.h.unwrap_or(0.0), i.s, i.v, i.a.unwrap_or(1.0)),
            format: Some(i.format),
        }
    }

    // ─── Channels ────────────────────────────────────────────────────────

    /// The canonical state.
    #[inline]
    #[must_use]
    pub const fn hsva(&self) -> Hsva {
        self.state
    }

    /// The recorded representation family, if any.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> Option<Format> {
        self.format
    }

    #[inline]
    #[must_use]
    pub const fn h(&self) -> f64 {
        self.state.h
    }

    #[inline]
    #[must_use]
    pub const fn s(&self) -> f64 {
        self.state.s
    }

    #[inline]
    #[must_use]
    pub const fn v(&self) -> f64 {
        self.state.v
    }

    #[inline]
    #[must_use]
    pub const fn a(&self) -> f64 {
        self.state.a
    }

    /// Set hue in degrees (wrapped into `[0, 360)`).
    pub fn set_h(&mut self, h: f64) {
        self.state.h = normalize_hue(h);
    }

    /// Set saturation (clamped to `[0, 1]`).
    pub fn set_s(&mut self, s: f64) {
        self.state.s = s.clamp(0.0, 1.0);
    }

    /// Set value (clamped to `[0, 1]`).
    pub fn set_v(&mut self, v: f64) {
        self.state.v = v.clamp(0.0, 1.0);
    }

    /// Set alpha (clamped to `[0, 1]`).
    pub fn set_a(&mut self, a: f64) {
        self.state.a = a.clamp(0.0, 1.0);
    }

    /// Replace all four channels, keeping the recorded family.
    pub fn set_hsva(&mut self, state: Hsva) {
        self.state = state;
    }

    /// Record a representation family.
    pub fn set_format(&mut self, format: Option<Format>) {
        self.format = format;
    }

    /// RGB channels in the 0–255 range, unrounded.
    #[must_use]
    pub fn rgb(&self) -> (f64, f64, f64) {
        hsv_to_rgb(self.state.h, self.state.s, self.state.v)
    }

    // ─── Reconciliation ──────────────────────────────────────────────────

    /// Whether any channel present in both `i` and this state differs.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn mismatches(&self, i: &Interpretation) -> bool {
        i.h.is_some_and(|h| h != self.state.h)
            || i.s != self.state.s
            || i.v != self.state.v
            || i.a.is_some_and(|a| a != self.state.a)
    }

    /// Overwrite every channel the interpretation carries; channels it
    /// does not carry (an achromatic hue, a missing alpha) are kept.
    pub fn absorb(&mut self, i: &Interpretation) {
        if let Some(h) = i.h {
            self.state.h = normalize_hue(h);
        }
        self.state.s = i.s.clamp(0.0, 1.0);
        self.state.v = i.v.clamp(0.0, 1.0);
        if let Some(a) = i.a {
            self.state.a = a.clamp(0.0, 1.0);
        }
    }

    /// Reconcile with an externally supplied interpretation.
    ///
    /// The family is always taken from the interpretation, since that is
    /// what the bound value now looks like. Channels are only replaced if
    /// at least one overlapping channel disagrees; otherwise the current
    /// state wins, which preserves channels (typically hue) that the
    /// incoming representation cannot express.
    ///
    /// Returns `true` when the channels were replaced.
    pub fn reconcile(&mut self, i: &Interpretation) -> bool {
        self.format = Some(i.format);
        if self.mismatches(i) {
            self.absorb(i);
            true
        } else {
            false
        }
    }

    // ─── Serialization ───────────────────────────────────────────────────

    /// CSS form: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    #[must_use]
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.rgb();
        if self.state.a >= 1.0 {
            format!("#{:06x}", pack_rgb(r, g, b))
        } else {
            format!(
                "rgba({},{},{},{})",
                channel_to_u8(r),
                channel_to_u8(g),
                channel_to_u8(b),
                self.state.a
            )
        }
    }

    /// `0xRRGGBB` integer form.
    #[must_use]
    pub fn to_hex_number(&self) -> u32 {
        let (r, g, b) = self.rgb();
        pack_rgb(r, g, b)
    }

    /// Serialize in the recorded family, or as a CSS string if none.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let Hsva { h, s, v, a } = self.state;
        let (r, g, b) = self.rgb();
        match self.format {
            None | Some(Format::Css) => Value::String(self.to_css()),
            Some(Format::HexNumber) => json!(self.to_hex_number()),
            Some(Format::RgbArray) => json!([r, g, b]),
            Some(Format::RgbaArray) => json!([r, g, b, a]),
            Some(Format::RgbObject) => object(&[("r", r), ("g", g), ("b", b)]),
            Some(Format::RgbaObject) => object(&[("r", r), ("g", g), ("b", b), ("a", a)]),
            Some(Format::HsvObject) => object(&[("h", h), ("s", s), ("v", v)]),
            Some(Format::HsvaObject) => object(&[("h", h), ("s", s), ("v", v), ("a", a)]),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(Hsva::default())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn object(fields: &[(&str, f64)]) -> Value {
    let mut map = Map::with_capacity(fields.len());
    for &(key, channel) in fields {
        map.insert(key.to_string(), json!(channel));
    }
    Value::Object(map)
}
