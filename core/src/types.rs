//! Resource DTOs served by the users collection.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration test catches any drift between the two crates.

use serde::{Deserialize, Serialize};

use crate::template::NameableResource;

/// A user account. `id` is assigned by the server on creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl NameableResource for User {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        self.id.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
