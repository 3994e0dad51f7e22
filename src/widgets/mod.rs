// SPDX-License-Identifier: MPL-2.0

//! Custom widgets for the Lectern application.

pub mod cascade;

pub use cascade::CascadeSelector;
