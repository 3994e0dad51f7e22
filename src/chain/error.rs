// SPDX-License-Identifier: MPL-2.0

use super::option::OptionValue;
use thiserror::Error;

/// Misuse of a [`DependencyChain`](super::DependencyChain).
///
/// These never come from the network; they mean a caller asked for a
/// transition that would break the chain's invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("level {level} is out of range for a chain of {len} levels")]
    LevelOutOfRange { level: usize, len: usize },

    #[error("level {level} has no parent selection")]
    ParentUnselected { level: usize },

    #[error("level {level} is selected as {selected}, not {requested}")]
    ParentMismatch {
        level: usize,
        selected: OptionValue,
        requested: OptionValue,
    },
}
