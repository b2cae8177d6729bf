//! # Blocks
//!
//! A block is one node of the content tree: an identity, two scoped field
//! maps and an ordered list of child locations. Behaviour attached to a
//! block type lives in the editor crate; this is only the stored shape.

use crate::id::BlockId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Scoped field values (settings or content)
pub type Fields = std::collections::BTreeMap<String, Value>;

pub const DISPLAY_NAME_FIELD: &str = "display_name";
pub const COPIED_FROM_FIELD: &str = "copied_from_block";

/// Optional behaviours a block instance can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Has a dedicated authoring view distinct from its learner view
    AuthorView,
    /// May contain child blocks
    HasChildren,
}

/// Capability query resolved per instance
pub trait Capabilities {
    fn supports(&self, capability: Capability) -> bool;
}

/// A node in the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    /// Settings-scoped fields
    #[serde(default)]
    pub metadata: Fields,

    /// Content-scoped fields
    #[serde(default)]
    pub content: Fields,

    /// Child locations in tree order
    #[serde(default)]
    pub children: Vec<BlockId>,

    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            metadata: Fields::new(),
            content: Fields::new(),
            children: Vec::new(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn block_type(&self) -> &str {
        self.id.block_type()
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BlockId>) -> Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.metadata.get(DISPLAY_NAME_FIELD).and_then(Value::as_str)
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.metadata
            .insert(DISPLAY_NAME_FIELD.to_string(), Value::String(name.into()));
    }

    pub fn has_child(&self, child: &BlockId) -> bool {
        self.children.contains(child)
    }

    /// Append a child unless it is already present. Returns whether it was added.
    pub fn add_child(&mut self, child: BlockId) -> bool {
        if self.has_child(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Insert `child` directly after `anchor`, or at the end when `anchor`
    /// is not a child. Returns whether it was added.
    pub fn insert_child_after(&mut self, anchor: &BlockId, child: BlockId) -> bool {
        if self.has_child(&child) {
            return false;
        }

        match self.children.iter().position(|c| c == anchor) {
            Some(index) => self.children.insert(index + 1, child),
            None => self.children.push(child),
        }
        true
    }
}

impl Capabilities for Block {
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
