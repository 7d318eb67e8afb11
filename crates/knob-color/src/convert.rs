// SPDX-License-Identifier: MIT
//
// Color space conversion — HSV ↔ RGB.
//
// The picker edits hue, saturation and value independently, so HSV is
// the canonical space. RGB only exists at the edges: when a bound value
// arrives as an RGB-family representation, and when the state is written
// back out in one.
//
// Ranges used throughout:
//
//   h ∈ [0, 360)   degrees
//   s, v ∈ [0, 1]
//   r, g, b ∈ [0, 255]   floating point, rounded only by serializers
//
// Single-letter channel names are the standard convention here.
#![allow(clippy::many_single_char_names)]

// ─── Hue ─────────────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── HSV → RGB ───────────────────────────────────────────────────────────────

/// Convert HSV to RGB channels in the 0–255 range.
///
/// The hue is split into six 60° sectors; within a sector one channel is
/// at `v`, one at `p = v(1 - s)`, and the third ramps between them.
#[must_use]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h = normalize_hue(h) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * f.mul_add(-s, 1.0);
    let t = v * (1.0 - f).mul_add(-s, 1.0);

    // `sector` is in 0..6 after normalization; the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match sector as u8 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (r * 255.0, g * 255.0, b * 255.0)
}

// ─── RGB → HSV ───────────────────────────────────────────────────────────────

/// The HSV reading of an RGB triple.
///
/// `h` is `None` when the color is achromatic (all channels equal, which
/// includes black): no hue can be recovered from such a color, and the
/// caller decides what hue to keep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvReading {
    pub h: Option<f64>,
    pub s: f64,
    pub v: f64,
}

/// Convert RGB channels in the 0–255 range to HSV.
#[must_use]
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> HsvReading {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if max <= 0.0 {
        return HsvReading { h: None, s: 0.0, v: 0.0 };
    }

    let s = delta / max;
    let v = max / 255.0;

    if delta <= 0.0 {
        return HsvReading { h: None, s, v };
    }

    #[allow(clippy::float_cmp)]
    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    HsvReading { h: Some(normalize_hue(h)), s, v }
}

// ─── Quantization ────────────────────────────────────────────────────────────

/// Round a 0–255 channel to a byte, half away from zero, clamped.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn channel_to_u8(c: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    c.round().clamp(0.0, 255.0) as u8
}

/// Pack three 0–255 channels into a `0xRRGGBB` integer.
#[inline]
#[must_use]
pub fn pack_rgb(r: f64, g: f64, b: f64) -> u32 {
    u32::from(channel_to_u8(r)) << 16 | u32::from(channel_to_u8(g)) << 8 | u32::from(channel_to_u8(b))
}

/// Split a `0xRRGGBB` integer into its three channels.
#[inline]
#[must_use]
pub fn unpack_rgb(hex: u32) -> (f64, f64, f64) {
    (
        f64::from((hex >> 16) & 0xff),
        f64::from((hex >> 8) & 0xff),
        f64::from(hex & 0xff),
    )
}
