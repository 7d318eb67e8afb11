// SPDX-License-Identifier: MIT
//
// knob-color — Color model for knob's picker.
//
// Colors are held as canonical HSVA so that hue, saturation, value and
// alpha can be edited independently, and carry the representation family
// they were bound with so they serialize back into the same shape. RGB is
// only an edge format, produced on demand.

pub mod color;
pub mod convert;
pub mod error;
pub mod gradient;
pub mod interpret;

pub use color::{Color, Format, Hsva};
pub use error::{ColorError, Result};
pub use gradient::{Direction, GradientStop, LinearGradient};
pub use interpret::{Interpretation, interpret};
