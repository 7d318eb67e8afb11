// SPDX-License-Identifier: MIT
//
// Color interpretation — from whatever the caller bound to a color
// controller to canonical channels.
//
// Accepted representations:
//
//   "#rgb" / "#rrggbb"              CSS hex (case-insensitive)
//   "rgb(r, g, b)"                  CSS functional, channels 0–255
//   "rgba(r, g, b, a)"              CSS functional with alpha 0–1
//   0xRRGGBB                        integer
//   [r, g, b] / [r, g, b, a]        numeric arrays
//   {r, g, b} / {r, g, b, a}        RGB objects
//   {h, s, v} / {h, s, v, a}        HSV objects
//
// Anything else reads as `None`. That is the "unrecognized" sentinel:
// callers must leave their state untouched when they get it.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::color::Format;
use crate::convert::{normalize_hue, rgb_to_hsv, unpack_rgb};

// ─── Interpretation ──────────────────────────────────────────────────────────

/// Channels read out of an external value.
///
/// Channels the representation cannot express are `None`: hue for any
/// achromatic RGB-family color, and alpha for families without one. A
/// CSS string always carries alpha (1 unless written as `rgba`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpretation {
    pub format: Format,
    pub h: Option<f64>,
    pub s: f64,
    pub v: f64,
    pub a: Option<f64>,
}

impl Interpretation {
    fn from_rgb(format: Format, r: f64, g: f64, b: f64, a: Option<f64>) -> Self {
        let (r, g, b) = (r.clamp(0.0, 255.0), g.clamp(0.0, 255.0), b.clamp(0.0, 255.0));
        let hsv = rgb_to_hsv(r, g, b);
        Self {
            format,
            h: hsv.h,
            s: hsv.s,
            v: hsv.v,
            a: a.map(|a| a.clamp(0.0, 1.0)),
        }
    }

    fn from_hsv(format: Format, h: f64, s: f64, v: f64, a: Option<f64>) -> Self {
        Self {
            format,
            h: Some(normalize_hue(h)),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
            a: a.map(|a| a.clamp(0.0, 1.0)),
        }
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Interpret an external color value.
///
/// Returns `None` for anything that is not an accepted representation.
#[must_use]
pub fn interpret(value: &Value) -> Option<Interpretation> {
    match value {
        Value::String(s) => interpret_css(s),
        Value::Number(n) => {
            let hex = n.as_u64().filter(|&hex| hex <= 0x00ff_ffff)?;
            let (r, g, b) = unpack_rgb(u32::try_from(hex).ok()?);
            Some(Interpretation::from_rgb(Format::HexNumber, r, g, b, None))
        }
        Value::Array(items) => interpret_array(items),
        Value::Object(map) => interpret_object(map),
        Value::Null | Value::Bool(_) => None,
    }
}

// ─── CSS strings ─────────────────────────────────────────────────────────────

const NUM: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)";

static SHORT_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f])([0-9a-f])([0-9a-f])$").expect("valid regex")
});

static LONG_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#([0-9a-f]{6})$").expect("valid regex"));

static CSS_RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^rgb\(\s*({NUM})\s*,\s*({NUM})\s*,\s*({NUM})\s*\)$"
    ))
    .expect("valid regex")
});

static CSS_RGBA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^rgba\(\s*({NUM})\s*,\s*({NUM})\s*,\s*({NUM})\s*,\s*({NUM})\s*\)$"
    ))
    .expect("valid regex")
});

fn interpret_css(text: &str) -> Option<Interpretation> {
    let text = text.trim();

    if let Some(caps) = SHORT_HEX.captures(text) {
        let digit = |i: usize| -> Option<f64> {
            let d = u8::from_str_radix(caps.get(i)?.as_str(), 16).ok()?;
            Some(f64::from(d * 17))
        };
        return Some(Interpretation::from_rgb(
            Format::Css,
            digit(1)?,
            digit(2)?,
            digit(3)?,
            Some(1.0),
        ));
    }

    if let Some(caps) = LONG_HEX.captures(text) {
        let hex = u32::from_str_radix(caps.get(1)?.as_str(), 16).ok()?;
        let (r, g, b) = unpack_rgb(hex);
        return Some(Interpretation::from_rgb(Format::Css, r, g, b, Some(1.0)));
    }

    if let Some(caps) = CSS_RGB.captures(text) {
        let channel = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse().ok() };
        return Some(Interpretation::from_rgb(
            Format::Css,
            channel(1)?,
            channel(2)?,
            channel(3)?,
            Some(1.0),
        ));
    }

    if let Some(caps) = CSS_RGBA.captures(text) {
        let channel = |i: usize| -> Option<f64> { caps.get(i)?.as_str().parse().ok() };
        return Some(Interpretation::from_rgb(
            Format::Css,
            channel(1)?,
            channel(2)?,
            channel(3)?,
            Some(channel(4)?),
        ));
    }

    None
}

// ─── Arrays and objects ──────────────────────────────────────────────────────

fn interpret_array(items: &[Value]) -> Option<Interpretation> {
    let channels: Vec<f64> = items.iter().map(Value::as_f64).collect::<Option<_>>()?;
    match channels.as_slice() {
        &[r, g, b] => Some(Interpretation::from_rgb(Format::RgbArray, r, g, b, None)),
        &[r, g, b, a] => Some(Interpretation::from_rgb(Format::RgbaArray, r, g, b, Some(a))),
        _ => None,
    }
}

fn interpret_object(map: &Map<String, Value>) -> Option<Interpretation> {
    let field = |key: &str| map.get(key).and_then(Value::as_f64);
    let alpha = field("a");

    if let (Some(r), Some(g), Some(b)) = (field("r"), field("g"), field("b")) {
        let format = if alpha.is_some() { Format::RgbaObject } else { Format::RgbObject };
        return Some(Interpretation::from_rgb(format, r, g, b, alpha));
    }

    if let (Some(h), Some(s), Some(v)) = (field("h"), field("s"), field("v")) {
        let format = if alpha.is_some() { Format::HsvaObject } else { Format::HsvObject };
        return Some(Interpretation::from_hsv(format, h, s, v, alpha));
    }

    None
}
