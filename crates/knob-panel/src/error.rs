//! Error type for controller construction and panel operations.
//!
//! Interactive input never surfaces here: text that does not parse is
//! reverted by the controller that received it. These errors are for
//! calling code that builds controllers or drives them programmatically.

use thiserror::Error;

use knob_color::ColorError;
use knob_input::InputError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// A numeric controller was given something that does not parse as a number.
    #[error("{name}: {value} is not a number")]
    NotANumber { name: String, value: String },

    /// A unit controller was given something other than `<number><px|em|pt>`.
    #[error("failed to interpret unit value {value}")]
    InvalidUnit { value: String },

    /// A string controller was given a structured value.
    #[error("value cannot be shown as text")]
    NotAString,

    /// `add_folder` with a name a sibling folder already uses.
    #[error("you already have a folder in this panel named {name:?}")]
    FolderExists { name: String },

    /// A controller or folder name a sibling controller already uses, or a
    /// controller name a sibling folder already uses.
    #[error("{name:?} is already used by another row of this panel")]
    NameTaken { name: String },

    #[error("no controller named {name:?}")]
    UnknownController { name: String },

    #[error("no folder named {name:?}")]
    UnknownFolder { name: String },

    /// A description named a controller type that does not exist.
    #[error("unknown controller type {kind:?}")]
    UnknownType { kind: String },

    /// An option controller was described without an option set.
    #[error("{name}: option controllers need an `options` list or map")]
    MissingOptions { name: String },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

pub type Result<T> = std::result::Result<T, ControlError>;
