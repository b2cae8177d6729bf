use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// The author performing an edit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

impl User {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.id == 0 || self.username.is_empty()
    }

    /// Writes require a known author
    pub fn validate(&self) -> ModelResult<()> {
        if self.is_anonymous() {
            return Err(ModelError::InvalidUser(format!(
                "anonymous user (id={}) cannot edit content",
                self.id
            )));
        }
        Ok(())
    }
}
