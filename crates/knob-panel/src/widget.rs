//! Display state, one struct per widget shape.
//!
//! A controller's widget is everything the layout layer needs to draw it,
//! computed by `update_display` from the value and options alone. Widgets
//! are plain data: the layout layer reads them and reports input back
//! through the controller's methods, never by mutating the widget.

use knob_color::LinearGradient;

use crate::unit::UnitSuffix;

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Number(NumberWidget),
    Checkbox(CheckboxWidget),
    Text(TextWidget),
    Select(SelectWidget),
    Radio(RadioWidget),
    Unit(UnitWidget),
    Color(Box<ColorWidget>),
}

impl Default for Widget {
    fn default() -> Self {
        Self::Text(TextWidget::default())
    }
}

impl Widget {
    /// Whether the widget's inputs are disabled.
    #[must_use]
    pub fn disabled(&self) -> bool {
        match self {
            Self::Number(w) => w.disabled,
            Self::Checkbox(w) => w.disabled,
            Self::Text(w) => w.disabled,
            Self::Select(w) => w.disabled,
            Self::Radio(w) => w.disabled,
            Self::Unit(w) => w.disabled,
            Self::Color(w) => w.disabled,
        }
    }

    /// One-line rendering, as a text-mode host would draw the row.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Number(w) => format!("[- {} +]", w.text),
            Self::Checkbox(w) => (if w.checked { "[x]" } else { "[ ]" }).to_string(),
            Self::Text(w) => format!("{:?}", w.text),
            Self::Select(w) => {
                let label = w.selected_label().unwrap_or_default();
                match &w.custom_widget {
                    Some(child) => format!("<{label}> {}", child.summary()),
                    None => format!("<{label}>"),
                }
            }
            Self::Radio(w) => {
                let marker = if w.open { "▴" } else { "▾" };
                format!("({}) {marker}", w.header)
            }
            Self::Unit(w) => format!("{} <{}>", w.magnitude, w.suffix),
            Self::Color(w) => {
                let marker = if w.picker_visible { " picker" } else { "" };
                format!("■ {}{marker}", w.text)
            }
        }
    }
}

// ─── Simple inputs ───────────────────────────────────────────────────────────

/// A text field flanked by decrement and increment buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberWidget {
    pub text: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckboxWidget {
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextWidget {
    pub text: String,
    pub disabled: bool,
}

/// A magnitude field and a suffix dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitWidget {
    pub magnitude: String,
    pub suffix: UnitSuffix,
    pub disabled: bool,
}

// ─── Choices ─────────────────────────────────────────────────────────────────

/// A dropdown over labelled options, with an optional custom entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectWidget {
    pub labels: Vec<String>,
    /// Index into `labels`, `None` when no listed option matches.
    pub selected: Option<usize>,
    /// The value matches no listed option.
    pub custom: bool,
    /// Label of the custom entry, if the controller has one.
    pub custom_label: Option<String>,
    /// The custom sub-controller's widget, present only while shown.
    pub custom_widget: Option<Box<Widget>>,
    pub disabled: bool,
}

impl SelectWidget {
    /// The label shown in the collapsed dropdown.
    #[must_use]
    pub fn selected_label(&self) -> Option<String> {
        match self.selected {
            Some(index) => self.labels.get(index).cloned(),
            None if self.custom => self.custom_label.clone(),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioEntry {
    pub display: String,
    pub checked: bool,
}

/// A collapsible radio list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioWidget {
    pub entries: Vec<RadioEntry>,
    /// Display text of the checked entry, empty when none is checked.
    pub header: String,
    pub open: bool,
    pub disabled: bool,
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// The draggable knob on the saturation/value field.
///
/// Positions are fractions of the field's extent, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldKnob {
    pub x: f64,
    pub y: f64,
    /// The current color, fully opaque.
    pub fill: String,
    /// White over dark or saturated colors, black otherwise.
    pub border: String,
}

/// Swatch, text field and the picker surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorWidget {
    pub text: String,
    pub swatch: String,
    pub picker_visible: bool,
    /// White to the fully saturated hue, left to right.
    pub field_gradient: LinearGradient,
    /// Transparent to black, top to bottom, laid over the field.
    pub value_gradient: LinearGradient,
    pub hue_gradient: LinearGradient,
    /// The current color from transparent to opaque, left to right.
    pub alpha_gradient: LinearGradient,
    pub field_knob: FieldKnob,
    /// Fraction down the hue rail.
    pub hue_knob: f64,
    /// Fraction across the alpha rail.
    pub alpha_knob: f64,
    pub disabled: bool,
}
