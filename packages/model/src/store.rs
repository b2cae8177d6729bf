//! # Block Storage
//!
//! The store is the persistence boundary for blocks. The editing core only
//! depends on the [`BlockStore`] trait; [`MemoryStore`] backs tests and
//! single-process tools.

use crate::block::Block;
use crate::error::{ModelError, ModelResult};
use crate::id::BlockId;
use crate::user::User;
use std::collections::BTreeMap;

/// Read/write access to stored blocks
pub trait BlockStore {
    /// Load one block
    fn get_item(&self, id: &BlockId) -> ModelResult<&Block>;

    /// Write a new block; fails if the location is taken
    fn create_item(&mut self, block: Block, user: &User) -> ModelResult<BlockId>;

    /// Overwrite an existing block
    fn update_item(&mut self, block: &Block, user: &User) -> ModelResult<()>;

    fn has_item(&self, id: &BlockId) -> bool {
        self.get_item(id).is_ok()
    }

    /// Load a block's children in tree order. A dangling child reference is
    /// an error, never skipped.
    fn get_children(&self, block: &Block) -> ModelResult<Vec<Block>> {
        block
            .children
            .iter()
            .map(|child| self.get_item(child).cloned())
            .collect()
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<BlockId, Block>,

    /// Number of successful writes
    pub version: u64,

    /// Last author to write each block
    edited_by: BTreeMap<BlockId, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn edited_by(&self, id: &BlockId) -> Option<u64> {
        self.edited_by.get(id).copied()
    }

    /// Insert a tree's worth of blocks without an author (fixtures, imports)
    pub fn seed(&mut self, blocks: impl IntoIterator<Item = Block>) {
        for block in blocks {
            self.items.insert(block.id.clone(), block);
        }
    }

    fn record_write(&mut self, id: &BlockId, user: &User) {
        self.version += 1;
        self.edited_by.insert(id.clone(), user.id);
    }
}

impl BlockStore for MemoryStore {
    fn get_item(&self, id: &BlockId) -> ModelResult<&Block> {
        self.items
            .get(id)
            .ok_or_else(|| ModelError::MissingBlock(id.to_string()))
    }

    fn create_item(&mut self, block: Block, user: &User) -> ModelResult<BlockId> {
        user.validate()?;

        if self.items.contains_key(&block.id) {
            return Err(ModelError::DuplicateId(block.id.to_string()));
        }

        let id = block.id.clone();
        self.items.insert(id.clone(), block);
        self.record_write(&id, user);
        Ok(id)
    }

    fn update_item(&mut self, block: &Block, user: &User) -> ModelResult<()> {
        user.validate()?;

        let slot = self
            .items
            .get_mut(&block.id)
            .ok_or_else(|| ModelError::MissingBlock(block.id.to_string()))?;
        *slot = block.clone();

        self.record_write(&block.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> BlockId {
        BlockId::new("ctx", "html", name).unwrap()
    }

    fn staff() -> User {
        User::new(1, "staff")
    }

    #[test]
    fn test_create_and_get() {
        let mut store = MemoryStore::new();
        store.create_item(Block::new(id("a")), &staff()).unwrap();

        assert!(store.has_item(&id("a")));
        assert_eq!(store.version, 1);
        assert_eq!(store.edited_by(&id("a")), Some(1));
    }

    #[test]
    fn test_create_rejects_existing_location() {
        let mut store = MemoryStore::new();
        store.create_item(Block::new(id("a")), &staff()).unwrap();

        let err = store.create_item(Block::new(id("a")), &staff()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId(_)));
    }

    #[test]
    fn test_update_requires_existing_block() {
        let mut store = MemoryStore::new();
        let err = store.update_item(&Block::new(id("a")), &staff()).unwrap_err();
        assert!(matches!(err, ModelError::MissingBlock(_)));
        assert_eq!(store.version, 0);
    }

    #[test]
    fn test_writes_reject_anonymous_user() {
        let mut store = MemoryStore::new();
        let err = store
            .create_item(Block::new(id("a")), &User::new(0, "anon"))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidUser(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_children_in_tree_order() {
        let mut store = MemoryStore::new();
        let parent = Block::new(id("p")).with_children([id("c"), id("a"), id("b")]);
        store.seed([
            parent.clone(),
            Block::new(id("a")),
            Block::new(id("b")),
            Block::new(id("c")),
        ]);

        let children = store.get_children(&parent).unwrap();
        let ids: Vec<_> = children.iter().map(|b| b.id.block_id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_get_children_fails_on_dangling_reference() {
        let mut store = MemoryStore::new();
        let parent = Block::new(id("p")).with_children([id("a"), id("gone")]);
        store.seed([parent.clone(), Block::new(id("a"))]);

        let err = store.get_children(&parent).unwrap_err();
        assert_eq!(err, ModelError::MissingBlock(id("gone").to_string()));
    }
}
