// SPDX-License-Identifier: MPL-2.0

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

/// Role of the signed-in user, used only to decide which pages are shown.
///
/// The backend enforces access; hiding a page here is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// Base URL of the LMS REST API (e.g., http://localhost:8080/api)
    pub api_url: String,
    /// Bearer token for the LMS API; empty means anonymous
    pub auth_token: String,
    /// Role used to pick the visible pages
    pub role: Role,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::from("http://localhost:8080/api"),
            auth_token: String::new(),
            role: Role::default(),
        }
    }
}

impl Config {
    /// The persisted session token, if one is set.
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.auth_token.trim();
        (!token.is_empty()).then_some(token)
    }
}
