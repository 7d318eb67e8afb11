//! Dropdown controller over a fixed option set.
//!
//! Options are an ordered list of `(label, value)` pairs. The selection
//! is the first option whose value equals the controller's value; when
//! none does, the controller is showing a *custom* value.
//!
//! An option controller may own a custom sub-controller (any kind) plus
//! a custom entry in the dropdown. The sub-controller is shown only while
//! the value is custom, mirrors the parent's readonly flag, and every
//! edit made through it is forwarded up as the parent's new value.

use serde_json::Value;
use tracing::trace;

use knob_input::{KeyEvent, PointerEvent};

use crate::controller::{Controller, Core, Kind};
use crate::error::{ControlError, Result};
use crate::params::{ControllerParams, CustomParams};
use crate::value::to_text;
use crate::widget::{SelectWidget, Widget};

/// The dropdown value of the custom entry. A bound value equal to it is
/// always treated as custom.
pub const CUSTOM_FLAG: &str = "";

/// Label of the custom entry when none is given.
pub const DEFAULT_CUSTOM_DISPLAY: &str = "Custom";

/// Read an option set: a list (each element labels itself) or an ordered
/// `label → value` object.
#[must_use]
pub fn parse_options(options: &Value) -> Option<Vec<(String, Value)>> {
    match options {
        Value::Array(items) => Some(items.iter().map(|v| (to_text(v), v.clone())).collect()),
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
        _ => None,
    }
}

#[derive(Debug)]
struct CustomEntry {
    display: String,
    controller: Box<dyn Controller>,
}

#[derive(Debug)]
pub struct OptionController {
    core: Core,
    source: Value,
    entries: Vec<(String, Value)>,
    custom: Option<CustomEntry>,
    widget: Widget,
}

impl OptionController {
    /// # Errors
    ///
    /// Returns [`ControlError::MissingOptions`] if `options` is neither a
    /// list nor an object.
    pub fn new(name: impl Into<String>, value: Value, options: &Value) -> Result<Self> {
        let name = name.into();
        let Some(entries) = parse_options(options) else {
            return Err(ControlError::MissingOptions { name });
        };
        let mut controller = Self {
            core: Core::new(name, Kind::Option, value),
            source: options.clone(),
            entries,
            custom: None,
            widget: Widget::default(),
        };
        controller.update_display();
        Ok(controller)
    }

    /// Attach a custom entry backed by `controller`.
    #[must_use]
    pub fn with_custom(mut self, display: Option<String>, controller: Box<dyn Controller>) -> Self {
        self.custom = Some(CustomEntry {
            display: display.unwrap_or_else(|| DEFAULT_CUSTOM_DISPLAY.to_string()),
            controller,
        });
        self.update_display();
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Index of the option matching the current value.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        let value = self.core.value();
        if value.as_str() == Some(CUSTOM_FLAG) {
            return None;
        }
        self.entries.iter().position(|(_, option)| self.core.same(value, option))
    }

    /// Whether the current value matches no listed option.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.selected().is_none()
    }

    #[must_use]
    pub fn custom(&self) -> Option<&dyn Controller> {
        self.custom.as_ref().map(|entry| -> &dyn Controller { entry.controller.as_ref() })
    }

    fn custom_visible(&self) -> bool {
        self.custom.is_some() && self.is_custom()
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Pick the option at `index`. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// Never fails in practice; option controllers accept every value.
    pub fn select(&mut self, index: usize) -> Result<bool> {
        let Some((_, value)) = self.entries.get(index) else {
            return Ok(false);
        };
        self.set_value(value.clone())?;
        Ok(true)
    }

    /// Pick the custom entry, adopting the sub-controller's value.
    /// Returns `false` if there is no custom entry.
    ///
    /// # Errors
    ///
    /// Never fails in practice; option controllers accept every value.
    pub fn select_custom(&mut self) -> Result<bool> {
        let Some(value) = self.custom().map(|c| c.value().clone()) else {
            return Ok(false);
        };
        self.set_value(value)?;
        Ok(true)
    }

    /// Set the custom sub-controller's value and forward the result.
    /// Returns `false` if there is no custom entry.
    ///
    /// # Errors
    ///
    /// Returns whatever the sub-controller rejects.
    pub fn edit_custom(&mut self, value: Value) -> Result<bool> {
        let Some(entry) = &mut self.custom else {
            return Ok(false);
        };
        entry.controller.set_value(value)?;
        self.forward_custom()?;
        Ok(true)
    }

    /// Adopt the sub-controller's value if it differs from ours.
    fn forward_custom(&mut self) -> Result<()> {
        let Some(value) = self.custom().map(|c| c.value().clone()) else {
            return Ok(());
        };
        if !self.core.same(&value, self.core.value()) {
            self.set_value(value)?;
        }
        Ok(())
    }
}

impl Controller for OptionController {
    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Any value is accepted. Every non-silent set also fires the
    /// finish-change observer, changed or not.
    fn set_value_with(&mut self, value: Value, silent: bool) -> Result<()> {
        self.core.assign(value, silent);
        self.update_display();
        if !silent {
            self.core.finish();
        }
        Ok(())
    }

    fn update_display(&mut self) {
        trace!(name = self.core.name(), "refresh option");
        let selected = self.selected();
        let custom = selected.is_none();
        let readonly = self.core.readonly();

        if let Some(entry) = &mut self.custom {
            if entry.controller.readonly() != readonly {
                entry.controller.set_readonly(readonly);
            }
        }

        let (custom_label, custom_widget) = match &self.custom {
            Some(entry) => (
                Some(entry.display.clone()),
                custom.then(|| Box::new(entry.controller.widget().clone())),
            ),
            None => (None, None),
        };

        self.widget = Widget::Select(SelectWidget {
            labels: self.entries.iter().map(|(label, _)| label.clone()).collect(),
            selected,
            custom,
            custom_label,
            custom_widget,
            disabled: readonly,
        });
    }

    fn widget(&self) -> &Widget {
        &self.widget
    }

    fn describe(&self) -> ControllerParams {
        let custom = self.custom.as_ref().map(|entry| CustomParams {
            display: (entry.display != DEFAULT_CUSTOM_DISPLAY).then(|| entry.display.clone()),
            controller: Box::new(entry.controller.describe()),
        });
        ControllerParams {
            options: Some(self.source.clone()),
            custom,
            ..ControllerParams::from_core(&self.core)
        }
    }

    /// Typed text goes to the custom sub-controller while it is shown.
    fn submit_text(&mut self, text: &str) -> Result<bool> {
        if !self.custom_visible() {
            return Ok(false);
        }
        let Some(entry) = &mut self.custom else {
            return Ok(false);
        };
        let handled = entry.controller.submit_text(text)?;
        self.forward_custom()?;
        Ok(handled)
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool> {
        if !self.custom_visible() {
            return Ok(false);
        }
        let Some(entry) = &mut self.custom else {
            return Ok(false);
        };
        let handled = entry.controller.handle_key(key)?;
        self.forward_custom()?;
        Ok(handled)
    }

    /// Pointer events reach the sub-controller whenever it exists, so a
    /// drag that started while it was shown still ends.
    fn pointer(&mut self, event: &PointerEvent) -> Result<bool> {
        let Some(entry) = &mut self.custom else {
            return Ok(false);
        };
        let consumed = entry.controller.pointer(event)?;
        if consumed {
            self.forward_custom()?;
        }
        Ok(consumed)
    }
}
