//! Radio-list controller with a collapsible dropdown.
//!
//! Each option is `{value, display}`; a plain value is its own display.
//! The checked entry is the one equal to the controller's value and the
//! collapsed header shows its display text.
//!
//! Opening the dropdown arms a one-shot guard: the click that opened it
//! also reaches the host as an outside click, so the first outside click
//! after opening is swallowed and only the next one closes it.

use serde_json::Value;
use tracing::trace;

use knob_input::{KeyCode, KeyEvent};

use crate::controller::{Controller, Core, Kind};
use crate::error::{ControlError, Result};
use crate::params::ControllerParams;
use crate::value::to_text;
use crate::widget::{RadioEntry, RadioWidget, Widget};

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: Value,
    pub display: String,
}

impl Choice {
    fn from_option(option: &Value) -> Self {
        if let Value::Object(map) = option {
            if let Some(value) = map.get("value") {
                let display = map.get("display").map_or_else(|| to_text(value), to_text);
                return Self { value: value.clone(), display };
            }
        }
        Self { value: option.clone(), display: to_text(option) }
    }
}

#[derive(Debug)]
pub struct CustomOptionController {
    core: Core,
    source: Value,
    choices: Vec<Choice>,
    open: bool,
    first_click: bool,
    widget: Widget,
}

impl CustomOptionController {
    /// # Errors
    ///
    /// Returns [`ControlError::MissingOptions`] unless `options` is a list.
    pub fn new(name: impl Into<String>, value: Value, options: &Value) -> Result<Self> {
        let name = name.into();
        let Value::Array(items) = options else {
            return Err(ControlError::MissingOptions { name });
        };
        let mut controller = Self {
            core: Core::new(name, Kind::CustomOption, value),
            source: options.clone(),
            choices: items.iter().map(Choice::from_option).collect(),
            open: false,
            first_click: false,
            widget: Widget::default(),
        };
        controller.update_display();
        Ok(controller)
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn checked(&self) -> Option<usize> {
        let value = self.core.value();
        self.choices.iter().position(|choice| self.core.same(value, &choice.value))
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Check the entry at `index`. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// Never fails in practice; this controller accepts every value.
    pub fn choose(&mut self, index: usize) -> Result<bool> {
        let Some(choice) = self.choices.get(index) else {
            return Ok(false);
        };
        self.set_value(choice.value.clone())?;
        Ok(true)
    }

    /// A click on the header. Disabled while readonly.
    pub fn toggle_dropdown(&mut self) {
        if self.core.readonly() {
            return;
        }
        self.open = !self.open;
        self.first_click = self.open;
        self.update_display();
    }

    /// A click anywhere outside the header.
    pub fn outside_click(&mut self) {
        if !self.open {
            return;
        }
        if self.first_click {
            self.first_click = false;
        } else {
            self.open = false;
            self.update_display();
        }
    }
}

impl Controller for CustomOptionController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        self.core.assign(value, silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh custom option");
        let checked = self.checked();
        let entries: Vec<RadioEntry> = self
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| RadioEntry { display: choice.display.clone(), checked: checked == Some(i) })
            .collect();
        let header = checked
            .and_then(|i| self.choices.get(i))
            .map(|choice| choice.display.clone())
            .unwrap_or_default();
        self.widget = Widget::Radio(RadioWidget {
            entries,
            header,
            open: self.open,
            disabled: self.core.readonly(),
        });
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        ControllerParams {
            options: Some(self.source.clone()),
            ..ControllerParams::from_core(&self.core)
        }
    }

    /// Escape closes an open dropdown.
    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Escape && self.open {
            self.open = false;
            self.update_display();
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn quality() -> CustomOptionController {
        let options = json!([
            {"value": "lo", "display": "Low"},
            {"value": "hi", "display": "High"},
            "max"
        ]);
        CustomOptionController::new("quality", json!("hi"), &options).unwrap()
    }

    fn radio(c: &CustomOptionController) -> RadioWidget {
        match c.widget() {
            Widget::Radio(w) => w.clone(),
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn entries_and_header() {
        let c = quality();
        let displays: Vec<_> = c.choices().iter().map(|choice| choice.display.as_str()).collect();
        assert_eq!(displays, vec!["Low", "High", "max"]);
        assert_eq!(c.checked(), Some(1));
        let w = radio(&c);
        assert_eq!(w.header, "High");
        assert_eq!(w.entries.iter().filter(|e| e.checked).count(), 1);
        assert_eq!(c.widget().summary(), "(High) ▾");
    }

    #[test]
    fn choose_sets_value() {
        let mut c = quality();
        assert!(c.choose(2).unwrap());
        assert_eq!(c.value(), &json!("max"));
        assert_eq!(radio(&c).header, "max");
        assert!(!c.choose(3).unwrap());
    }

    #[test]
    fn unlisted_value_checks_nothing() {
        let mut c = quality();
        c.set_value(json!("ultra")).unwrap();
        assert_eq!(c.checked(), None);
        assert_eq!(radio(&c).header, "");
    }

    #[test]
    fn first_outside_click_is_swallowed() {
        let mut c = quality();
        c.toggle_dropdown();
        assert!(c.is_open());
        c.outside_click();
        assert!(c.is_open());
        c.outside_click();
        assert!(!c.is_open());
        assert_eq!(c.widget().summary(), "(High) ▾");
    }

    #[test]
    fn header_click_closes() {
        let mut c = quality();
        c.toggle_dropdown();
        c.toggle_dropdown();
        assert!(!c.is_open());
        c.outside_click();
        assert!(!c.is_open());
    }

    #[test]
    fn escape_closes() {
        let mut c = quality();
        c.toggle_dropdown();
        assert!(c.handle_key(&KeyEvent::new(KeyCode::Escape)).unwrap());
        assert!(!c.is_open());
        assert!(!c.handle_key(&KeyEvent::new(KeyCode::Escape)).unwrap());
    }

    #[test]
    fn readonly_blocks_dropdown() {
        let mut c = quality();
        c.set_readonly(true);
        c.toggle_dropdown();
        assert!(!c.is_open());
        assert!(radio(&c).disabled);
    }

    #[test]
    fn options_must_be_a_list() {
        assert_eq!(
            CustomOptionController::new("q", json!(1), &json!({"a": 1})).unwrap_err(),
            ControlError::MissingOptions { name: "q".into() }
        );
    }
}
