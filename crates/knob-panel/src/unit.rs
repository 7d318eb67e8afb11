//! CSS length controller: a magnitude and a two-letter suffix.
//!
//! The bound value is always the canonical text form, magnitude then
//! suffix with nothing between (`10px`, `1.5em`). Editing either half
//! rebuilds the whole string.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::{trace, warn};

use crate::controller::{Controller, Core, Kind};
use crate::error::{ControlError, Result};
use crate::params::ControllerParams;
use crate::value::{display_number, parse_number};
use crate::widget::{UnitWidget, Widget};

// ─── Unit ────────────────────────────────────────────────────────────────────

/// The closed set of accepted suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSuffix {
    Px,
    Em,
    Pt,
}

impl UnitSuffix {
    pub const ALL: [Self; 3] = [Self::Px, Self::Em, Self::Pt];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Em => "em",
            Self::Pt => "pt",
        }
    }

    #[must_use]
    pub fn from_suffix(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|suffix| suffix.as_str() == s)
    }
}

impl fmt::Display for UnitSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub magnitude: f64,
    pub suffix: UnitSuffix,
}

impl FromStr for Unit {
    type Err = ControlError;

    /// The last two characters are the suffix, everything before them
    /// must be numeric.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ControlError::InvalidUnit { value: s.to_string() };
        let split = s.len().checked_sub(2).filter(|&i| s.is_char_boundary(i)).ok_or_else(invalid)?;
        let (magnitude, suffix) = s.split_at(split);
        Ok(Self {
            magnitude: parse_number(magnitude).ok_or_else(invalid)?,
            suffix: UnitSuffix::from_suffix(suffix).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", display_number(self.magnitude), self.suffix)
    }
}

fn parse_value(value: &Value) -> Result<Unit> {
    match value {
        Value::String(s) => s.parse(),
        other => Err(ControlError::InvalidUnit { value: other.to_string() }),
    }
}

// ─── UnitController ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UnitController {
    core: Core,
    unit: Unit,
    widget: Widget,
}

impl UnitController {
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidUnit`] unless `value` is a string of
    /// the form `<number><px|em|pt>`.
    pub fn new(name: impl Into<String>, value: Value) -> Result<Self> {
        let unit = parse_value(&value)?;
        let mut controller = Self {
            core: Core::new(name, Kind::Unit, Value::String(unit.to_string())),
            unit,
            widget: Widget::default(),
        };
        controller.update_display();
        Ok(controller)
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// The magnitude field changed. Non-numeric text keeps the old
    /// magnitude; the value is rebuilt either way.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the rebuilt string is always valid.
    pub fn edit_magnitude(&mut self, text: &str) -> Result<()> {
        match parse_number(text) {
            Some(magnitude) => self.unit.magnitude = magnitude,
            None => warn!(name = self.core.name(), text, "not a number, keeping magnitude"),
        }
        self.set_value(Value::String(self.unit.to_string()))
    }

    /// The suffix dropdown changed.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the rebuilt string is always valid.
    pub fn edit_suffix(&mut self, suffix: UnitSuffix) -> Result<()> {
        self.unit.suffix = suffix;
        self.set_value(Value::String(self.unit.to_string()))
    }
}

impl Controller for UnitController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        let unit = parse_value(&value)?;
        self.core.assign(Value::String(unit.to_string()), silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh unit");
        if let Ok(unit) = parse_value(self.core.value()) {
            self.unit = unit;
        }
        self.widget = Widget::Unit(UnitWidget {
            magnitude: display_number(self.unit.magnitude),
            suffix: self.unit.suffix,
            disabled: self.core.readonly(),
        });
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        ControllerParams::from_core(&self.core)
    }

    fn submit_text(&mut self, text: &str) -> Result<bool> {
        self.edit_magnitude(text)?;
        Ok(true)
    }
}
