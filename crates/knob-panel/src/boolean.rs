//! Checkbox controller.

use serde_json::Value;
use tracing::trace;

use knob_input::{KeyCode, KeyEvent};

use crate::controller::{Controller, Core, Kind};
use crate::error::Result;
use crate::params::ControllerParams;
use crate::value::truthy;
use crate::widget::{CheckboxWidget, Widget};

/// Holds a boolean; anything else is coerced by truthiness.
#[derive(Debug)]
pub struct BooleanController {
    core: Core,
    widget: Widget,
}

impl BooleanController {
    #[must_use]
    pub fn new(name: impl Into<String>, value: &Value) -> Self {
        let mut controller = Self {
            core: Core::new(name, Kind::Boolean, Value::Bool(truthy(value))),
            widget: Widget::default(),
        };
        controller.update_display();
        controller
    }

    #[must_use]
    pub fn checked(&self) -> bool {
        truthy(self.core.value())
    }

    /// A click on the checkbox: flip and commit.
    ///
    /// # Errors
    ///
    /// Never fails; booleans accept every value.
    pub fn toggle(&mut self) -> Result<()> {
        self.set_value(Value::Bool(!self.checked()))?;
        self.core.finish();
        Ok(())
    }
}

impl Controller for BooleanController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        self.core.assign(Value::Bool(truthy(&value)), silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh boolean");
        self.widget = Widget::Checkbox(CheckboxWidget {
            checked: self.checked(),
            disabled: self.core.readonly(),
        });
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        ControllerParams::from_core(&self.core)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle().map(|()| true),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn coerces_by_truthiness() {
        let mut b = BooleanController::new("on", &json!("yes"));
        assert_eq!(b.value(), &json!(true));
        b.set_value(json!(0)).unwrap();
        assert_eq!(b.value(), &json!(false));
        b.set_value(json!([])).unwrap();
        assert!(b.checked());
    }

    #[test]
    fn toggle_fires_change_and_finish() {
        let mut b = BooleanController::new("on", &json!(false));
        let log = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::clone(&log);
        let finishes = Rc::clone(&log);
        b.on_change(Box::new(move |v: &Value| changes.borrow_mut().push(format!("change {v}"))));
        b.on_finish_change(Box::new(move |v: &Value| finishes.borrow_mut().push(format!("finish {v}"))));

        b.toggle().unwrap();
        assert_eq!(*log.borrow(), vec!["change true", "finish true"]);
        assert_eq!(b.widget().summary(), "[x]");
    }

    #[test]
    fn space_and_enter_toggle() {
        let mut b = BooleanController::new("on", &json!(false));
        assert!(b.handle_key(&KeyEvent::new(KeyCode::Char(' '))).unwrap());
        assert!(b.checked());
        assert!(b.handle_key(&KeyEvent::new(KeyCode::Enter)).unwrap());
        assert!(!b.checked());
        assert!(!b.handle_key(&KeyEvent::new(KeyCode::Up)).unwrap());
    }

    #[test]
    fn loose_equality_sees_one_as_true() {
        let mut b = BooleanController::new("on", &json!(true));
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        b.on_change(Box::new(move |_: &Value| *sink.borrow_mut() += 1));
        b.set_value(json!(1)).unwrap();
        assert_eq!(*count.borrow(), 0);
    }
}
