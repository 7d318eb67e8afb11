//! knob-panel: bound, coerced values and the panel that lays them out.
//!
//! Every row of a panel is a [`Controller`]: it holds one value, coerces
//! what it is given into its own domain (clamped and stepped numbers,
//! unit strings, colors in whatever representation they arrived in),
//! reports changes to its observers, and keeps a [`Widget`] describing
//! what a host should draw.
//!
//! # Controllers
//!
//! | Kind            | Type                       | Widget      |
//! |-----------------|----------------------------|-------------|
//! | `number`        | [`NumberController`]       | `[- n +]`   |
//! | `boolean`       | [`BooleanController`]      | checkbox    |
//! | `string`        | [`StringController`]       | text field  |
//! | `option`        | [`OptionController`]       | dropdown    |
//! | `custom-option` | [`CustomOptionController`] | radio list  |
//! | `unit`          | [`UnitController`]         | `n <px>`    |
//! | `color`         | [`ColorController`]        | HSV picker  |
//!
//! # Panels
//!
//! A [`Panel`] owns controllers and named folders. It can be built from a
//! JSON [`PanelDescription`], saved to a `name → value` map and loaded
//! back.
//!
//! ```
//! use knob_panel::{Panel, PanelDescription};
//! use serde_json::json;
//!
//! let description = PanelDescription::from_json(
//!     r#"{"controllers": [{"type": "number", "name": "n", "value": 0, "min": 0, "max": 10, "step": 2}]}"#,
//! )
//! .unwrap();
//! let mut panel = Panel::from_description(&description).unwrap();
//! panel.set("n", json!(7)).unwrap();
//! assert_eq!(panel.save().get("n"), Some(&json!(8)));
//! ```

pub mod boolean;
pub mod color;
pub mod controller;
pub mod custom_option;
pub mod error;
pub mod number;
pub mod option;
pub mod panel;
pub mod params;
pub mod string;
pub mod unit;
pub mod value;
pub mod widget;

pub use boolean::BooleanController;
pub use color::{ColorController, PickerLayout, PickerSurface};
pub use controller::{Callback, Controller, Core, Equality, Kind, ReadonlyCallback};
pub use custom_option::{Choice, CustomOptionController};
pub use error::{ControlError, Result};
pub use number::NumberController;
pub use option::OptionController;
pub use panel::{Panel, Row};
pub use params::{ControllerParams, CustomParams, PanelDescription};
pub use string::StringController;
pub use unit::{Unit, UnitController, UnitSuffix};
pub use widget::Widget;
