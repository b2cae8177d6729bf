//! # Child Duplication
//!
//! When a block is duplicated, its children must be copied exactly once.
//! Either the block type copies them (and says so by returning
//! [`ChildrenHandling::Handled`]) or the generic engine runs its own pass,
//! never both.
//!
//! The routine here works on one tree level only. Recursion belongs to the
//! [`Duplicator`] callback, which copies a child and that child's subtree.

use crate::errors::EditorResult;
use studio_model::{Block, BlockId, BlockStore, User};
use tracing::{debug, instrument};

/// Whether a block type already copied the children of a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildrenHandling {
    /// Children were copied; the engine must skip its own pass
    Handled,
    /// The engine must copy the children
    NotHandled,
}

impl ChildrenHandling {
    pub fn is_handled(self) -> bool {
        matches!(self, ChildrenHandling::Handled)
    }
}

/// Copies one block (and its subtree) under a new parent
pub trait Duplicator {
    /// Create a copy of `child` bound under `new_parent` and return its
    /// location. The copy exists in `store` when this returns `Ok`.
    fn duplicate(
        &self,
        child: &BlockId,
        new_parent: &BlockId,
        store: &mut dyn BlockStore,
        user: &User,
    ) -> EditorResult<BlockId>;
}

impl<F> Duplicator for F
where
    F: Fn(&BlockId, &BlockId, &mut dyn BlockStore, &User) -> EditorResult<BlockId>,
{
    fn duplicate(
        &self,
        child: &BlockId,
        new_parent: &BlockId,
        store: &mut dyn BlockStore,
        user: &User,
    ) -> EditorResult<BlockId> {
        self(child, new_parent, store, user)
    }
}

/// Copy `source`'s children under `dest`, one level, in tree order
///
/// Each copy is bound into `dest` unless the callback already did it. The
/// first failure aborts; siblings copied before it are not rolled back.
#[instrument(skip_all, fields(dest = %dest, source = %source.id, shallow = shallow, children = source.children.len()))]
pub fn handle_children_duplication(
    dest: &BlockId,
    source: &Block,
    store: &mut dyn BlockStore,
    user: &User,
    duplicator: &dyn Duplicator,
    shallow: bool,
) -> EditorResult<()> {
    if shallow || source.children.is_empty() {
        return Ok(());
    }

    let children = source.children.clone();
    for child in &children {
        let dupe = duplicator.duplicate(child, dest, store, user)?;
        debug!(child = %child, dupe = %dupe, "Duplicated child");

        let mut parent = store.get_item(dest)?.clone();
        if parent.add_child(dupe) {
            store.update_item(&parent, user)?;
        }
    }

    Ok(())
}
