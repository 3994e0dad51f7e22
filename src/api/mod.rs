// SPDX-License-Identifier: MPL-2.0

mod error;
mod lms;

pub use error::ApiError;
pub use lms::{Endpoint, LmsClient};
