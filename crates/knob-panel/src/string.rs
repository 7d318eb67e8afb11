//! Free text controller.

use serde_json::Value;
use tracing::trace;

use knob_input::{KeyCode, KeyEvent};

use crate::controller::{Controller, Core, Kind};
use crate::error::{ControlError, Result};
use crate::params::ControllerParams;
use crate::value::to_text;
use crate::widget::{TextWidget, Widget};

/// Holds text. Numbers and booleans are accepted as their text form;
/// `null`, arrays and objects are not.
#[derive(Debug)]
pub struct StringController {
    core: Core,
    widget: Widget,
}

fn coerce(value: &Value) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(_) | Value::Bool(_) => Ok(Value::String(to_text(value))),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(ControlError::NotAString),
    }
}

impl StringController {
    /// # Errors
    ///
    /// Returns [`ControlError::NotAString`] for `null`, arrays and objects.
    pub fn new(name: impl Into<String>, value: &Value) -> Result<Self> {
        let mut controller = Self {
            core: Core::new(name, Kind::String, coerce(value)?),
            widget: Widget::default(),
        };
        controller.update_display();
        Ok(controller)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.core.value().as_str().unwrap_or_default()
    }

    /// One keystroke's worth of editing: the whole field's new text.
    ///
    /// # Errors
    ///
    /// Never fails; text is always accepted.
    pub fn input(&mut self, text: &str) -> Result<()> {
        self.set_value(Value::String(text.to_string()))
    }

    /// The field lost focus.
    pub fn blur(&mut self) {
        self.core.finish();
    }
}

impl Controller for StringController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        let value = coerce(&value)?;
        self.core.assign(value, silent);
        self.update_display();
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh string");
        self.widget = Widget::Text(TextWidget {
            text: self.text().to_string(),
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
        self.input(text)?;
        self.blur();
        Ok(true)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Enter {
            self.blur();
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
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn primitives_become_text() {
        let s = StringController::new("label", &json!(12.5)).unwrap();
        assert_eq!(s.value(), &json!("12.5"));
        let s = StringController::new("label", &json!(true)).unwrap();
        assert_eq!(s.text(), "true");
    }

    #[test]
    fn structures_are_rejected() {
        assert_eq!(StringController::new("label", &json!({"a": 1})).unwrap_err(), ControlError::NotAString);
        let mut s = StringController::new("label", &json!("keep")).unwrap();
        assert!(s.set_value(json!(null)).is_err());
        assert_eq!(s.text(), "keep");
    }

    #[test]
    fn input_changes_blur_finishes() {
        let mut s = StringController::new("label", &json!("")).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::clone(&log);
        let finishes = Rc::clone(&log);
        s.on_change(Box::new(move |v: &Value| changes.borrow_mut().push(format!("change {v}"))));
        s.on_finish_change(Box::new(move |v: &Value| finishes.borrow_mut().push(format!("finish {v}"))));

        s.input("h").unwrap();
        s.input("hi").unwrap();
        s.blur();
        assert_eq!(
            *log.borrow(),
            vec![r#"change "h""#, r#"change "hi""#, r#"finish "hi""#]
        );
        assert_eq!(s.widget().summary(), "\"hi\"");
    }

    #[test]
    fn submit_text_is_input_then_blur() {
        let mut s = StringController::new("label", &json!("a")).unwrap();
        let finished = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&finished);
        s.on_finish_change(Box::new(move |_: &Value| *sink.borrow_mut() += 1));
        assert!(s.submit_text("b").unwrap());
        assert_eq!(s.text(), "b");
        assert!(s.handle_key(&KeyEvent::new(KeyCode::Enter)).unwrap());
        assert_eq!(*finished.borrow(), 2);
    }

    #[test]
    fn numbers_written_as_text() {
        let mut s = StringController::new("label", &json!("8")).unwrap();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        s.on_change(Box::new(move |_: &Value| *sink.borrow_mut() += 1));
        s.set_value(json!(8)).unwrap();
        assert_eq!(*count.borrow(), 0);
        s.set_value(json!(8.5)).unwrap();
        assert_eq!(s.value(), &json!("8.5"));
        assert_eq!(*count.borrow(), 1);
    }
}
