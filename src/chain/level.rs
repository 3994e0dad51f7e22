// SPDX-License-Identifier: MPL-2.0

//! Static description of one level of a dependency chain.

use super::mapping::{Envelope, Extractor};
use crate::api::Endpoint;

/// Where a level's options come from and how they are read.
#[derive(Debug, Clone)]
pub struct LevelSpec {
    /// Stable identifier, used in logs.
    pub key: &'static str,
    /// Localised label shown next to the dropdown.
    pub title: String,
    pub endpoint: Endpoint,
    pub envelope: Envelope,
    pub extractor: Extractor,
}

impl LevelSpec {
    /// Creates a level that accepts the default envelopes.
    pub fn new(
        key: &'static str,
        title: impl Into<String>,
        endpoint: Endpoint,
        extractor: impl Into<Extractor>,
    ) -> Self {
        Self {
            key,
            title: title.into(),
            endpoint,
            envelope: Envelope::default(),
            extractor: extractor.into(),
        }
    }

    /// Overrides where the entity array is looked up.
    pub fn envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }
}
