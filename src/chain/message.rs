// SPDX-License-Identifier: MPL-2.0

//! Messages emitted by cascade selector widgets.

use super::option::SelectOption;

/// User intent on a dependency chain.
///
/// These should be wrapped by the parent's message type and handed to the
/// chain in the parent's update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainMessage {
    /// An option was picked at `level`, or the level was cleared (`None`).
    Select {
        level: usize,
        option: Option<SelectOption>,
    },
    /// The user asked to reload a level after a failure.
    Retry { level: usize },
}
