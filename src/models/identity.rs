//! Signed-in user identity
//!
//! Handed explicitly to services and views; nothing in the crate reads a
//! process-wide "current user".

use serde::{Deserialize, Serialize};

use super::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

impl Identity {
    pub fn new(user_id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Name for greetings, falling back to the email address
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}
