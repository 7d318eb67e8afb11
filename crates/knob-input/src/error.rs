// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by the drag session machinery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A press arrived for a surface that already has a live session.
    #[error("a drag session is already active on {surface}")]
    SessionActive { surface: String },
}

pub type Result<T> = std::result::Result<T, InputError>;
