//! The controller contract shared by every variant.
//!
//! A controller holds one bound value, coerces whatever it is given into
//! its own domain, and tells up to three observers about it:
//!
//! - **change**: the value differs from what it was (not fired when silent)
//! - **finish change**: an edit was committed (Enter, blur, release)
//! - **readonly change**: the readonly flag was set
//!
//! Shared state lives in [`Core`]. Variants embed one and implement
//! [`Controller`], overriding only what they coerce or display
//! differently; everything else comes from the trait's provided methods.
//!
//! Every accepted `set_value` ends in `update_display`, whether or not the
//! value changed, so an external write can force a redraw. The display is
//! a pure function of value and options and never calls back out.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

use knob_input::{KeyEvent, PointerEvent};

use crate::error::{ControlError, Result};
use crate::params::ControllerParams;
use crate::value::{loose_eq, strict_eq, truthy};
use crate::widget::Widget;

/// Observer of value changes.
pub type Callback = Box<dyn FnMut(&Value)>;

/// Observer of the readonly flag.
pub type ReadonlyCallback = Box<dyn FnMut(bool)>;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The controller variant, used as the `type` tag in descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Boolean,
    String,
    Option,
    CustomOption,
    Color,
    Unit,
}

impl Kind {
    pub const ALL: [Self; 7] = [
        Self::Number,
        Self::Boolean,
        Self::String,
        Self::Option,
        Self::CustomOption,
        Self::Color,
        Self::Unit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Option => "option",
            Self::CustomOption => "custom-option",
            Self::Color => "color",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ControlError::UnknownType { kind: s.to_string() })
    }
}

// ─── Equality ────────────────────────────────────────────────────────────────

/// How a controller decides that a new value is a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Equality {
    /// `8` and `"8"` are the same value; writing one over the other is a
    /// no-op and fires nothing.
    #[default]
    Loose,
    /// Values must agree in type as well.
    Strict,
}

impl Equality {
    #[must_use]
    pub fn same(self, a: &Value, b: &Value) -> bool {
        match self {
            Self::Loose => loose_eq(a, b),
            Self::Strict => strict_eq(a, b),
        }
    }
}

// ─── Core ────────────────────────────────────────────────────────────────────

/// Option keys the panel chrome reads.
pub const READONLY: &str = "readonly";
pub const INFO: &str = "info";
pub const EDITABLE: &str = "editable";

/// State every controller carries.
pub struct Core {
    name: String,
    kind: Kind,
    value: Value,
    initial_value: Value,
    previous_value: Value,
    options: Map<String, Value>,
    equality: Equality,
    on_change: Option<Callback>,
    on_finish_change: Option<Callback>,
    on_readonly_change: Option<ReadonlyCallback>,
}

impl Core {
    /// A core whose current, initial and previous values are all `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: Kind, value: Value) -> Self {
        Self {
            name: name.into(),
            kind,
            initial_value: value.clone(),
            previous_value: value.clone(),
            value,
            options: Map::new(),
            equality: Equality::default(),
            on_change: None,
            on_finish_change: None,
            on_readonly_change: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn initial_value(&self) -> &Value {
        &self.initial_value
    }

    #[must_use]
    pub const fn previous_value(&self) -> &Value {
        &self.previous_value
    }

    #[must_use]
    pub const fn equality(&self) -> Equality {
        self.equality
    }

    pub fn set_equality(&mut self, equality: Equality) {
        self.equality = equality;
    }

    pub fn set_initial_value(&mut self, value: Value) {
        self.initial_value = value;
    }

    pub fn set_prev_value(&mut self, value: Value) {
        self.previous_value = value;
    }

    /// Whether `a` and `b` count as the same value for this controller.
    #[must_use]
    pub fn same(&self, a: &Value, b: &Value) -> bool {
        self.equality.same(a, b)
    }

    /// Replace the value if it differs, firing the change observer unless
    /// `silent`. Returns whether the value was replaced.
    pub fn assign(&mut self, value: Value, silent: bool) -> bool {
        if self.equality.same(&value, &self.value) {
            return false;
        }
        self.value = value;
        debug!(name = %self.name, value = %self.value, silent, "value changed");
        if !silent {
            if let Some(callback) = &mut self.on_change {
                callback(&self.value);
            }
        }
        true
    }

    /// Tell the finish-change observer about the current value.
    pub fn finish(&mut self) {
        if let Some(callback) = &mut self.on_finish_change {
            callback(&self.value);
        }
    }

    // ─── Options ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn set_option(&mut self, key: &str, value: Value) {
        self.options.insert(key.to_string(), value);
    }

    #[must_use]
    pub const fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    #[must_use]
    pub fn readonly(&self) -> bool {
        self.option(READONLY).is_some_and(truthy)
    }

    /// Store the flag and tell the readonly observer.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.set_option(READONLY, Value::Bool(readonly));
        if let Some(callback) = &mut self.on_readonly_change {
            callback(readonly);
        }
    }

    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.option(INFO).and_then(Value::as_str)
    }

    #[must_use]
    pub fn editable(&self) -> bool {
        self.option(EDITABLE).is_some_and(truthy)
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("initial_value", &self.initial_value)
            .field("previous_value", &self.previous_value)
            .field("options", &self.options)
            .field("equality", &self.equality)
            .field("on_change", &self.on_change.is_some())
            .field("on_finish_change", &self.on_finish_change.is_some())
            .field("on_readonly_change", &self.on_readonly_change.is_some())
            .finish()
    }
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// A bound, coerced value paired with its display state.
pub trait Controller: fmt::Debug {
    fn core(&self) -> &Core;

    fn core_mut(&mut self) -> &mut Core;

    /// Coerce `value` into this controller's domain and commit it.
    ///
    /// `silent` commits without notifying observers. The display is
    /// refreshed either way.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be coerced at all; the
    /// controller is left unchanged.
    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()>;

    /// Rebuild the display state from the current value and options.
    fn update_display(&mut self);

    /// The display state built by the last `update_display`.
    fn widget(&self) -> &Widget;

    /// Construction parameters that rebuild this controller as it is now.
    fn describe(&self) -> ControllerParams;

    /// Text typed into the widget and committed. Returns `false` for
    /// controllers without a text field.
    ///
    /// # Errors
    ///
    /// Text that does not parse is reverted, not reported; errors only
    /// come from the commit itself.
    fn submit_text(&mut self, _text: &str) -> Result<bool> {
        Ok(false)
    }

    /// A key pressed while the widget has focus. Returns whether it was
    /// handled.
    ///
    /// # Errors
    ///
    /// Propagates errors from the value the key commits.
    fn handle_key(&mut self, _key: &KeyEvent) -> Result<bool> {
        Ok(false)
    }

    /// A pointer event from anywhere in the host. Returns whether it was
    /// consumed.
    ///
    /// # Errors
    ///
    /// Propagates drag session errors.
    fn pointer(&mut self, _event: &PointerEvent) -> Result<bool> {
        Ok(false)
    }

    // ─── Provided ────────────────────────────────────────────────────────

    fn name(&self) -> &str {
        self.core().name()
    }

    fn kind(&self) -> Kind {
        self.core().kind()
    }

    fn value(&self) -> &Value {
        self.core().value()
    }

    /// # Errors
    ///
    /// See [`set_value_with`](Controller::set_value_with).
    fn set_value(&mut self, value: Value) -> Result<()> {
        self.set_value_with(value, false)
    }

    /// # Errors
    ///
    /// See [`set_value_with`](Controller::set_value_with).
    fn set_value_silent(&mut self, value: Value) -> Result<()> {
        self.set_value_with(value, true)
    }

    /// Set the value back to the initial value.
    ///
    /// # Errors
    ///
    /// See [`set_value_with`](Controller::set_value_with).
    fn reset_value(&mut self, silent: bool) -> Result<()> {
        let initial = self.core().initial_value().clone();
        self.set_value_with(initial, silent)
    }

    /// Whether the value differs from the last value recorded with
    /// [`set_prev_value`](Controller::set_prev_value).
    fn is_modified(&self) -> bool {
        !strict_eq(self.core().previous_value(), self.core().value())
    }

    fn set_prev_value(&mut self, value: Value) {
        self.core_mut().set_prev_value(value);
    }

    fn set_initial_value(&mut self, value: Value) {
        self.core_mut().set_initial_value(value);
    }

    fn readonly(&self) -> bool {
        self.core().readonly()
    }

    /// Readonly is advisory: it disables the widget but does not block
    /// `set_value`.
    fn set_readonly(&mut self, readonly: bool) {
        self.core_mut().set_readonly(readonly);
        self.update_display();
    }

    fn set_equality(&mut self, equality: Equality) {
        self.core_mut().set_equality(equality);
    }

    fn on_change(&mut self, callback: Callback) {
        self.core_mut().on_change = Some(callback);
    }

    fn on_finish_change(&mut self, callback: Callback) {
        self.core_mut().on_finish_change = Some(callback);
    }

    fn on_readonly_change(&mut self, callback: ReadonlyCallback) {
        self.core_mut().on_readonly_change = Some(callback);
    }
}
