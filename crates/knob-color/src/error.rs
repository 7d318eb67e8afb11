// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while reading external color values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The value is none of the accepted color representations.
    #[error("unrecognized color value: {0}")]
    Unrecognized(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
