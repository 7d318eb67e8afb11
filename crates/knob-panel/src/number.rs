//! Numeric controller — clamp, step, precision.
//!
//! Every value a number controller accepts goes through the same pipeline:
//!
//! 1. read as a number (numeric prefix of text is enough)
//! 2. clamp to `[min, max]`
//! 3. round to the nearest multiple of `step`
//! 4. if that left the bounds, take the nearest multiple inside them, or
//!    the bound itself when no multiple fits
//! 5. round to as many decimals as `step` has
//!
//! Increment, decrement and typed text all end in `set_value`, so none of
//! them can produce a value the pipeline would not.

use serde_json::Value;
use tracing::{trace, warn};

use knob_input::{KeyCode, KeyEvent};

use crate::controller::{Controller, Core, Kind};
use crate::error::{ControlError, Result};
use crate::params::ControllerParams;
use crate::value::{decimals, display_number, number_value, parse_number, to_number};
use crate::widget::{NumberWidget, Widget};

/// Arrow-key steps taken per press while Shift is held.
const SHIFT_STEPS: f64 = 10.0;

/// Half-up rounding: `-2.5` → `-2`, `2.5` → `3`.
#[inline]
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to `precision` decimal places.
fn round_to(x: f64, precision: usize) -> f64 {
    format!("{x:.precision$}").parse().unwrap_or(x)
}

#[derive(Debug)]
pub struct NumberController {
    core: Core,
    min: Option<f64>,
    max: Option<f64>,
    step: f64,
    precision: usize,
    widget: Widget,
}

impl NumberController {
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Create a controller; the initial value is coerced like any other.
    ///
    /// A missing, zero, negative or non-finite `step` falls back to
    /// [`DEFAULT_STEP`](Self::DEFAULT_STEP).
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::NotANumber`] if `value` is not a JSON number.
    pub fn new(
        name: impl Into<String>,
        value: Value,
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    ) -> Result<Self> {
        let name = name.into();
        let Some(initial) = value.as_f64() else {
            return Err(ControlError::NotANumber { name, value: value.to_string() });
        };

        let step = Self::sanitize_step(step);
        let mut controller = Self {
            core: Core::new(name.clone(), Kind::Number, Value::Null),
            min,
            max,
            step,
            precision: decimals(step),
            widget: Widget::default(),
        };
        let coerced = number_value(controller.coerce(initial));
        controller.core = Core::new(name, Kind::Number, coerced);
        controller.update_display();
        Ok(controller)
    }

    fn sanitize_step(step: Option<f64>) -> f64 {
        step.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(Self::DEFAULT_STEP)
    }

    // ─── Coercion ────────────────────────────────────────────────────────

    /// Run `v` through clamp, step and precision.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn coerce(&self, v: f64) -> f64 {
        let mut v = v;
        if let Some(min) = self.min.filter(|&min| v < min) {
            v = min;
        } else if let Some(max) = self.max.filter(|&max| v > max) {
            v = max;
        }

        if v % self.step != 0.0 {
            v = round_half_up(v / self.step) * self.step;
        }

        round_to(self.fit_bounds(v), self.precision)
    }

    /// Pull a stepped value that rounding pushed past a bound back inside.
    fn fit_bounds(&self, v: f64) -> f64 {
        if let Some(min) = self.min.filter(|&min| v < min) {
            let inside = (min / self.step).ceil() * self.step;
            return if self.max.is_some_and(|max| inside > max) { min } else { inside };
        }
        if let Some(max) = self.max.filter(|&max| v > max) {
            let inside = (max / self.step).floor() * self.step;
            return if self.min.is_some_and(|min| inside < min) { max } else { inside };
        }
        v
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// The current value as a number.
    #[must_use]
    pub fn number(&self) -> f64 {
        to_number(self.core.value()).unwrap_or_default()
    }

    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Decimal places kept, taken from `step`.
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Bounds and step apply from the next `set_value` on; the current
    /// value is left as it is.
    pub fn set_min(&mut self, min: Option<f64>) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: Option<f64>) {
        self.max = max;
    }

    pub fn set_step(&mut self, step: f64) {
        self.step = Self::sanitize_step(Some(step));
        self.precision = decimals(self.step);
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Never fails in practice; the current value is always numeric.
    pub fn increment(&mut self) -> Result<()> {
        self.set_value(number_value(self.number() + self.step))
    }

    /// # Errors
    ///
    /// Never fails in practice; the current value is always numeric.
    pub fn decrement(&mut self) -> Result<()> {
        self.set_value(number_value(self.number() - self.step))
    }
}

impl Controller for NumberController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        let Some(v) = to_number(&value) else {
            return Err(ControlError::NotANumber {
                name: self.core.name().to_string(),
                value: value.to_string(),
            });
        };
        self.core.assign(number_value(self.coerce(v)), silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh number");
        self.widget = Widget::Number(NumberWidget {
            text: display_number(self.number()),
            disabled: self.core.readonly(),
        });
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        ControllerParams {
            min: self.min,
            max: self.max,
            step: Some(self.step),
            ..ControllerParams::from_core(&self.core)
        }
    }

    /// Whole-string numeric text is committed; anything else re-applies
    /// the current value, which puts its text back in the field.
    fn submit_text(&mut self, text: &str) -> Result<bool> {
        let value = if let Some(v) = parse_number(text) {
            number_value(v)
        } else {
            warn!(name = self.core.name(), text, "not a number, keeping previous value");
            self.core.value().clone()
        };
        self.set_value(value)?;
        self.core.finish();
        Ok(true)
    }

    /// Arrows step once; with Shift held they step ten times as far.
    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        let steps = if key.shift() { SHIFT_STEPS } else { 1.0 };
        let delta = match key.code {
            KeyCode::Up => steps * self.step,
            KeyCode::Down => -steps * self.step,
            _ => return Ok(false),
        };
        self.set_value(number_value(self.number() + delta))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knob_input::Modifiers;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn number(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> NumberController {
        NumberController::new("n", json!(0), min, max, step).unwrap()
    }

    fn set(controller: &mut NumberController, v: Value) -> Value {
        controller.set_value(v).unwrap();
        controller.value().clone()
    }

    fn record_changes(controller: &mut NumberController) -> Rc<RefCell<Vec<Value>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.on_change(Box::new(move |v: &Value| sink.borrow_mut().push(v.clone())));
        seen
    }

    // ── Coercion ─────────────────────────────────────────────────────────

    #[test]
    fn rounds_to_nearest_step_within_range() {
        let mut n = number(Some(0.0), Some(10.0), Some(2.0));
        assert_eq!(set(&mut n, json!(7)), json!(8));
    }

    #[test]
    fn clamps_to_bounds() {
        let mut n = number(Some(0.0), Some(10.0), Some(2.0));
        assert_eq!(set(&mut n, json!(-3)), json!(0));
        assert_eq!(set(&mut n, json!(99)), json!(10));
    }

    #[test]
    fn precision_follows_step() {
        let mut n = number(None, None, Some(0.1));
        assert_eq!(n.precision(), 1);
        assert_eq!(set(&mut n, json!(0.33)), json!(0.3));

        let mut n = number(None, None, Some(0.25));
        assert_eq!(set(&mut n, json!(0.3)), json!(0.25));
        assert_eq!(n.widget().summary(), "[- 0.25 +]");
    }

    #[test]
    fn default_step_is_one() {
        let mut n = number(None, None, None);
        assert_eq!(n.step(), 1.0);
        assert_eq!(set(&mut n, json!(2.6)), json!(3));
        assert!(n.value().is_i64());

        let n = number(None, None, Some(0.0));
        assert_eq!(n.step(), 1.0);
    }

    #[test]
    fn stepping_past_a_bound_uses_inside_multiple() {
        let mut n = number(Some(1.0), Some(10.0), Some(4.0));
        assert_eq!(set(&mut n, json!(10)), json!(8));
        assert_eq!(set(&mut n, json!(1)), json!(4));
    }

    #[test]
    fn no_multiple_inside_falls_back_to_bound() {
        let mut n = number(Some(1.0), Some(3.0), Some(5.0));
        assert_eq!(set(&mut n, json!(2)), json!(1));
    }

    #[test]
    fn initial_value_is_coerced() {
        let n = NumberController::new("n", json!(7), Some(0.0), Some(10.0), Some(2.0)).unwrap();
        assert_eq!(n.value(), &json!(8));
        assert_eq!(n.core().initial_value(), &json!(8));
        assert!(!n.is_modified());
    }

    // ── Rejection ────────────────────────────────────────────────────────

    #[test]
    fn construction_needs_a_number() {
        let err = NumberController::new("speed", json!("5"), None, None, None).unwrap_err();
        assert_eq!(err, ControlError::NotANumber { name: "speed".into(), value: "\"5\"".into() });
    }

    #[test]
    fn numeric_prefix_is_accepted() {
        let mut n = number(None, None, None);
        assert_eq!(set(&mut n, json!("12px")), json!(12));
    }

    #[test]
    fn unparseable_value_is_an_error_and_keeps_state() {
        let mut n = number(None, None, None);
        set(&mut n, json!(4));
        assert!(matches!(n.set_value(json!("abc")), Err(ControlError::NotANumber { .. })));
        assert!(n.set_value(json!(null)).is_err());
        assert_eq!(n.value(), &json!(4));
    }

    // ── Text and keys ────────────────────────────────────────────────────

    #[test]
    fn typed_text_commits_and_finishes() {
        let mut n = number(None, None, Some(0.5));
        let finished = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&finished);
        n.on_finish_change(Box::new(move |v: &Value| sink.borrow_mut().push(v.clone())));

        assert!(n.submit_text(" 2.7 ").unwrap());
        assert_eq!(n.value(), &json!(2.5));
        assert!(n.submit_text("2.7kg").unwrap());
        assert_eq!(n.value(), &json!(2.5));
        assert_eq!(*finished.borrow(), vec![json!(2.5), json!(2.5)]);
    }

    #[test]
    fn invalid_text_reverts_display() {
        let mut n = number(None, None, None);
        set(&mut n, json!(6));
        let changes = record_changes(&mut n);
        n.submit_text("six").unwrap();
        assert_eq!(n.widget().summary(), "[- 6 +]");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn arrow_keys_step() {
        let mut n = number(Some(0.0), Some(1.0), Some(0.5));
        assert!(n.handle_key(&KeyEvent::new(KeyCode::Up)).unwrap());
        assert_eq!(n.value(), &json!(0.5));
        n.handle_key(&KeyEvent::new(KeyCode::Up)).unwrap();
        n.handle_key(&KeyEvent::new(KeyCode::Up)).unwrap();
        assert_eq!(n.value(), &json!(1));
        n.handle_key(&KeyEvent::new(KeyCode::Down)).unwrap();
        assert_eq!(n.value(), &json!(0.5));
        assert!(!n.handle_key(&KeyEvent::new(KeyCode::Enter)).unwrap());
    }

    #[test]
    fn shift_arrows_take_ten_steps() {
        let mut n = number(Some(0.0), Some(100.0), Some(1.0));
        let up = KeyEvent::with_modifiers(KeyCode::Up, Modifiers::SHIFT);
        assert!(n.handle_key(&up).unwrap());
        assert_eq!(n.value(), &json!(10));
        n.handle_key(&KeyEvent::new(KeyCode::Up)).unwrap();
        assert_eq!(n.value(), &json!(11));
        n.handle_key(&KeyEvent::with_modifiers(KeyCode::Down, Modifiers::SHIFT)).unwrap();
        assert_eq!(n.value(), &json!(1));
        n.handle_key(&KeyEvent::with_modifiers(KeyCode::Down, Modifiers::SHIFT)).unwrap();
        assert_eq!(n.value(), &json!(0));
    }

    #[test]
    fn change_fires_once_per_distinct_value() {
        let mut n = number(Some(0.0), Some(10.0), Some(1.0));
        let changes = record_changes(&mut n);
        set(&mut n, json!(5));
        set(&mut n, json!(5.2));
        set(&mut n, json!(50));
        set(&mut n, json!(11));
        assert_eq!(*changes.borrow(), vec![json!(5), json!(10)]);
    }

    #[test]
    fn silent_set_skips_observer() {
        let mut n = number(None, None, None);
        let changes = record_changes(&mut n);
        n.set_value_silent(json!(3)).unwrap();
        assert_eq!(n.value(), &json!(3));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn reset_and_modified() {
        let mut n = NumberController::new("n", json!(2), None, None, None).unwrap();
        set(&mut n, json!(5));
        assert!(n.is_modified());
        n.set_prev_value(json!(5));
        assert!(!n.is_modified());
        n.reset_value(false).unwrap();
        assert_eq!(n.value(), &json!(2));
        assert!(n.is_modified());
    }

    #[test]
    fn readonly_disables_but_does_not_block() {
        let mut n = number(None, None, None);
        n.set_readonly(true);
        assert!(n.widget().disabled());
        set(&mut n, json!(9));
        assert_eq!(n.value(), &json!(9));
    }

    #[test]
    fn bounds_can_change_later() {
        let mut n = number(None, None, None);
        n.set_max(Some(5.0));
        n.set_step(0.5);
        assert_eq!(n.precision(), 1);
        assert_eq!(set(&mut n, json!(9)), json!(5));
        assert_eq!(n.describe().max, Some(5.0));
    }

    // ── Properties ───────────────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Steps with exact binary fractions and bounds on their multiples,
        /// so bounds and multiples compare exactly.
        fn setup() -> impl Strategy<Value = (f64, f64, f64)> {
            (prop::sample::select(vec![0.25, 0.5, 1.0, 2.0, 5.0]), -40_i32..40, 1_i32..40)
                .prop_map(|(step, low, span)| {
                    (step, f64::from(low) * step, f64::from(low + span) * step)
                })
        }

        proptest! {
            #[test]
            fn inside_values_land_on_step_multiples((step, min, max) in setup(), t in 0.0_f64..=1.0) {
                let v = t.mul_add(max - min, min);
                let mut n = number(Some(min), Some(max), Some(step));
                n.set_value(json!(v)).unwrap();
                let got = n.number();
                prop_assert!(got >= min && got <= max, "{got} outside [{min}, {max}]");
                let multiples = got / step;
                prop_assert!((multiples - multiples.round()).abs() < 1e-9, "{got} not a multiple of {step}");
            }

            #[test]
            fn outside_values_land_on_nearest_bound((step, min, max) in setup(), excess in 0.001_f64..1000.0) {
                let mut n = number(Some(min), Some(max), Some(step));
                n.set_value(json!(min - excess)).unwrap();
                prop_assert_eq!(n.number(), min);
                n.set_value(json!(max + excess)).unwrap();
                prop_assert_eq!(n.number(), max);
            }

            #[test]
            fn text_never_has_more_decimals_than_step(step in prop::sample::select(vec![0.1, 0.01, 0.25, 0.5, 3.0]), v in -1000.0_f64..1000.0) {
                let mut n = number(None, None, Some(step));
                n.set_value(json!(v)).unwrap();
                let text = display_number(n.number());
                let places = text.find('.').map_or(0, |dot| text.len() - dot - 1);
                prop_assert!(places <= n.precision(), "{text} for step {step}");
            }
        }
    }
}
