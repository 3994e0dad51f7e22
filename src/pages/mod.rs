// SPDX-License-Identifier: MPL-2.0

//! Page view modules for the Lectern application.
//! Each module contains the view logic for a specific page.

pub mod content;
pub mod dashboard;
pub mod enrollment;
pub mod settings;
pub mod widgets;
