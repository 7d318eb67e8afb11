//! Construction parameters and panel descriptions.
//!
//! A panel can be built from JSON:
//!
//! ```json
//! {
//!   "name": "Scene",
//!   "controllers": [
//!     { "type": "number", "name": "speed", "value": 3, "min": 0, "max": 10, "step": 0.5 },
//!     { "type": "option", "name": "mode", "value": "fast", "options": ["slow", "fast"] },
//!     { "type": "color", "name": "tint", "value": "#ff8800", "info": "overlay color" }
//!   ],
//!   "folders": [
//!     { "name": "Camera", "closed": true, "controllers": [] }
//!   ]
//! }
//! ```
//!
//! Saved state is the matching tree of values, `name → value` with folders
//! nesting as objects. [`PanelDescription::apply_saved`] writes such a
//! tree back into a description so that building it reproduces the
//! saved state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::boolean::BooleanController;
use crate::color::ColorController;
use crate::controller::{Controller, Core, EDITABLE, INFO, Kind, READONLY};
use crate::custom_option::CustomOptionController;
use crate::error::{ControlError, Result};
use crate::number::NumberController;
use crate::option::OptionController;
use crate::string::StringController;
use crate::unit::UnitController;

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(b: &bool) -> bool {
    !*b
}

// ─── ControllerParams ────────────────────────────────────────────────────────

/// Everything needed to construct one controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerParams {
    /// Type tag, one of the [`Kind`] names.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Option set: a list, or an ordered `label → value` map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    /// Text for the row's info badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Whether the row gets a readonly toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomParams>,
}

/// The custom entry of an option controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomParams {
    /// Label of the entry; `Custom` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub controller: Box<ControllerParams>,
}

impl ControllerParams {
    #[must_use]
    pub fn new(kind: Kind, name: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            name: name.into(),
            value,
            min: None,
            max: None,
            step: None,
            options: None,
            readonly: false,
            info: None,
            editable: false,
            custom: None,
        }
    }

    /// Parameters carrying a core's identity, value and chrome options.
    #[must_use]
    pub fn from_core(core: &Core) -> Self {
        Self {
            readonly: core.readonly(),
            info: core.info().map(str::to_string),
            editable: core.editable(),
            ..Self::new(core.kind(), core.name(), core.value().clone())
        }
    }

    /// Construct the controller these parameters describe.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::UnknownType`] for an unknown `type` tag,
    /// [`ControlError::MissingOptions`] for an option controller without
    /// options, and whatever the variant's constructor rejects.
    pub fn build(&self) -> Result<Box<dyn Controller>> {
        let name = self.name.clone();
        let value = self.value.clone();
        let mut controller: Box<dyn Controller> = match self.kind.parse::<Kind>()? {
            Kind::Number => {
                Box::new(NumberController::new(name, value, self.min, self.max, self.step)?)
            }
            Kind::Boolean => Box::new(BooleanController::new(name, &value)),
            Kind::String => Box::new(StringController::new(name, &value)?),
            Kind::Unit => Box::new(UnitController::new(name, value)?),
            Kind::Color => Box::new(ColorController::new(name, value)?),
            Kind::Option => {
                let options = self.require_options()?;
                let mut option = OptionController::new(name, value, options)?;
                if let Some(custom) = &self.custom {
                    option = option.with_custom(custom.display.clone(), custom.controller.build()?);
                }
                Box::new(option)
            }
            Kind::CustomOption => {
                Box::new(CustomOptionController::new(name, value, self.require_options()?)?)
            }
        };

        let core = controller.core_mut();
        if let Some(info) = &self.info {
            core.set_option(INFO, Value::String(info.clone()));
        }
        if self.editable {
            core.set_option(EDITABLE, Value::Bool(true));
        }
        if self.readonly {
            core.set_option(READONLY, Value::Bool(true));
        }
        controller.update_display();
        Ok(controller)
    }

    fn require_options(&self) -> Result<&Value> {
        self.options
            .as_ref()
            .ok_or_else(|| ControlError::MissingOptions { name: self.name.clone() })
    }
}

// ─── PanelDescription ────────────────────────────────────────────────────────

/// A panel and its folders, as plain data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelDescription {
    /// Panel title; folder names come from here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
    #[serde(default)]
    pub controllers: Vec<ControllerParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<PanelDescription>,
}

impl PanelDescription {
    /// Parse a description from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Overwrite initial values with those found in `saved`.
    ///
    /// Names missing from `saved` keep their values; folders read their
    /// values from the nested object under the folder's name.
    pub fn apply_saved(&mut self, saved: &Map<String, Value>) {
        for params in &mut self.controllers {
            if let Some(value) = saved.get(&params.name) {
                params.value = value.clone();
            }
        }
        for folder in &mut self.folders {
            let name = folder.name.clone().unwrap_or_default();
            if let Some(Value::Object(nested)) = saved.get(&name) {
                folder.apply_saved(nested);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SCENE: &str = r##"{
        "name": "Scene",
        "controllers": [
            { "type": "number", "name": "speed", "value": 3, "min": 0, "max": 10, "step": 0.5 },
            { "type": "option", "name": "mode", "value": "fast", "options": ["slow", "fast"] },
            { "type": "color", "name": "tint", "value": "#ff8800", "info": "overlay color" }
        ],
        "folders": [
            { "name": "Camera", "closed": true, "controllers": [
                { "type": "unit", "name": "width", "value": "10px", "editable": true }
            ] }
        ]
    }"##;

    #[test]
    fn parse_description() {
        let description = PanelDescription::from_json(SCENE).unwrap();
        assert_eq!(description.name.as_deref(), Some("Scene"));
        assert_eq!(description.controllers.len(), 3);
        assert_eq!(description.controllers[0].step, Some(0.5));
        assert_eq!(description.controllers[2].info.as_deref(), Some("overlay color"));
        assert!(description.folders[0].closed);
        assert!(description.folders[0].controllers[0].editable);
    }

    #[test]
    fn serialization_skips_defaults() {
        let params = ControllerParams::new(Kind::Boolean, "on", json!(true));
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"type": "boolean", "name": "on", "value": true})
        );
    }

    #[test]
    fn build_applies_chrome_options() {
        let mut params = ControllerParams::new(Kind::String, "title", json!("hello"));
        params.readonly = true;
        params.info = Some("shown in the header".into());
        params.editable = true;
        let controller = params.build().unwrap();
        assert!(controller.readonly());
        assert!(controller.widget().disabled());
        assert_eq!(controller.core().info(), Some("shown in the header"));
        assert!(controller.core().editable());
    }

    #[test]
    fn build_every_kind() {
        let description = PanelDescription::from_json(SCENE).unwrap();
        for params in &description.controllers {
            let controller = params.build().unwrap();
            assert_eq!(controller.kind().as_str(), params.kind);
        }
        let unit = description.folders[0].controllers[0].build().unwrap();
        assert_eq!(unit.kind(), Kind::Unit);
    }

    #[test]
    fn describe_rebuilds_the_same_controller() {
        let description = PanelDescription::from_json(SCENE).unwrap();
        for params in &description.controllers {
            let described = params.build().unwrap().describe();
            assert_eq!(&described, params);
        }
    }

    #[test]
    fn unknown_type_and_missing_options() {
        let params = ControllerParams::new(Kind::Option, "mode", json!("a"));
        assert_eq!(
            params.build().unwrap_err(),
            ControlError::MissingOptions { name: "mode".into() }
        );
        let mut params = ControllerParams::new(Kind::Number, "n", json!(1));
        params.kind = "slider".into();
        assert_eq!(
            params.build().unwrap_err(),
            ControlError::UnknownType { kind: "slider".into() }
        );
    }

    #[test]
    fn custom_option_builds_child() {
        let params: ControllerParams = serde_json::from_value(json!({
            "type": "option",
            "name": "size",
            "value": "13px",
            "options": {"Small": "10px", "Large": "20px"},
            "custom": {"display": "Other", "controller": {"type": "unit", "name": "size", "value": "13px"}}
        }))
        .unwrap();
        let controller = params.build().unwrap();
        assert_eq!(controller.widget().summary(), "<Other> 13 <px>");
    }

    #[test]
    fn apply_saved_rewrites_values() {
        let mut description = PanelDescription::from_json(SCENE).unwrap();
        let saved = json!({"speed": 7.5, "Camera": {"width": "2em"}, "stale": 1});
        description.apply_saved(saved.as_object().unwrap());
        assert_eq!(description.controllers[0].value, json!(7.5));
        assert_eq!(description.controllers[1].value, json!("fast"));
        assert_eq!(description.folders[0].controllers[0].value, json!("2em"));
    }
}
