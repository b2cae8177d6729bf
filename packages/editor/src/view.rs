//! Preview view selection
//!
//! Children are previewed in the authoring UI with their author view when
//! they have one, and with the learner-facing student view otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use studio_model::{Capabilities, Capability};

pub const AUTHOR_VIEW: &str = "author_view";
pub const STUDENT_VIEW: &str = "student_view";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewName {
    #[serde(rename = "author_view")]
    Author,
    #[serde(rename = "student_view")]
    Student,
}

impl ViewName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewName::Author => AUTHOR_VIEW,
            ViewName::Student => STUDENT_VIEW,
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the block declares a dedicated author view
pub fn has_author_view(block: &impl Capabilities) -> bool {
    block.supports(Capability::AuthorView)
}

/// View used to preview `block` inside the authoring UI
pub fn select_view(block: &impl Capabilities) -> ViewName {
    if has_author_view(block) {
        ViewName::Author
    } else {
        ViewName::Student
    }
}
