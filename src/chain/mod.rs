// SPDX-License-Identifier: MPL-2.0

//! Cascading dependent selectors.
//!
//! A dependency chain is an ordered list of dropdowns where the options of
//! each level are fetched for the value selected one level up (course →
//! chapter → content). Changing a selection clears everything below it at
//! once; the fetch for the next level is then issued, and its response is
//! applied only if nothing upstream has changed in the meantime.
//!
//! # Example
//!
//! ```ignore
//! // In your update function
//! match message {
//!     Message::Chain(ChainMessage::Select { level, option }) => {
//!         if let Ok(Some(ticket)) = self.chain.select_at(level, option) {
//!             let spec = self.chain.spec(ticket.level()).cloned();
//!             return self.fetch(spec, ticket);
//!         }
//!     }
//!     Message::Loaded(ticket, result) => {
//!         self.chain.finish_load(&ticket, result, |spec, err| {
//!             tracing::error!("{}: {}", spec.title, err);
//!         });
//!     }
//! }
//! ```

mod error;
mod level;
mod mapping;
mod message;
mod option;
mod state;

pub use error::ChainError;
pub use level::LevelSpec;
pub use mapping::{Envelope, Extractor, FieldMapping, label_text};
pub use message::ChainMessage;
pub use option::{OptionValue, SelectOption};
pub use state::{DependencyChain, FetchTicket, LevelPhase, LevelState, LoadOutcome};
