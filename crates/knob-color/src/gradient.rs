// SPDX-License-Identifier: MIT
//
// Linear gradient descriptions for the picker surfaces.
//
// These are pure data: the layout layer turns them into whatever it
// paints with. `to_css` gives the CSS `linear-gradient(..)` form, which
// is also what the CLI prints.

use std::fmt;

// ─── Direction ───────────────────────────────────────────────────────────────

/// The axis a gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left edge to right edge.
    ToRight,
    /// Top edge to bottom edge.
    ToBottom,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToRight => "to right",
            Self::ToBottom => "to bottom",
        }
    }
}

// ─── Stops ───────────────────────────────────────────────────────────────────

/// One color stop; `position` is a percentage along the gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub color: String,
    pub position: f64,
}

impl GradientStop {
    #[must_use]
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self { color: color.into(), position }
    }
}

/// The fixed hue rail spectrum, red at the top wrapping back to red.
const HUE_STOPS: [(&str, f64); 7] = [
    ("#ff0000", 0.0),
    ("#ff00ff", 17.0),
    ("#0000ff", 34.0),
    ("#00ffff", 50.0),
    ("#00ff00", 67.0),
    ("#ffff00", 84.0),
    ("#ff0000", 100.0),
];

// ─── LinearGradient ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub direction: Direction,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// A two-stop gradient from `from` at 0% to `to` at 100%.
    #[must_use]
    pub fn between(direction: Direction, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            direction,
            stops: vec![GradientStop::new(from, 0.0), GradientStop::new(to, 100.0)],
        }
    }

    /// The seven-stop hue spectrum, top to bottom.
    ///
    /// Hue increases upward on the rail, so reading downward the colors
    /// run red, magenta, blue, cyan, green, yellow, red.
    #[must_use]
    pub fn hue_spectrum() -> Self {
        Self {
            direction: Direction::ToBottom,
            stops: HUE_STOPS
                .iter()
                .map(|&(color, position)| GradientStop::new(color, position))
                .collect(),
        }
    }

    /// CSS `linear-gradient(..)` form.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = format!("linear-gradient({}", self.direction.as_str());
        for stop in &self.stops {
            css.push_str(&format!(", {} {}%", stop.color, stop.position));
        }
        css.push(')');
        css
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
