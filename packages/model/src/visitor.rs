use crate::block::Block;
use crate::error::ModelResult;
use crate::id::BlockId;
use crate::store::BlockStore;

/// Visitor pattern for traversing a stored block tree
///
/// The default implementation walks the whole subtree in tree order
/// (pre-order, children left to right). Override `visit_block` to act on
/// each node and call `walk_block` to keep descending.
pub trait BlockVisitor: Sized {
    fn visit_block(&mut self, store: &dyn BlockStore, block: &Block) -> ModelResult<()> {
        walk_block(self, store, block)
    }
}

pub fn walk_block<V: BlockVisitor>(
    visitor: &mut V,
    store: &dyn BlockStore,
    block: &Block,
) -> ModelResult<()> {
    for child in &block.children {
        let child = store.get_item(child)?;
        visitor.visit_block(store, child)?;
    }
    Ok(())
}

/// Visit the subtree rooted at `root`, root included
pub fn visit_tree<V: BlockVisitor>(
    visitor: &mut V,
    store: &dyn BlockStore,
    root: &BlockId,
) -> ModelResult<()> {
    let block = store.get_item(root)?;
    visitor.visit_block(store, block)
}

struct SubtreeCollector {
    ids: Vec<BlockId>,
}

impl BlockVisitor for SubtreeCollector {
    fn visit_block(&mut self, store: &dyn BlockStore, block: &Block) -> ModelResult<()> {
        self.ids.push(block.id.clone());
        walk_block(self, store, block)
    }
}

/// All locations in the subtree rooted at `root`, in pre-order
pub fn collect_subtree(store: &dyn BlockStore, root: &BlockId) -> ModelResult<Vec<BlockId>> {
    let mut collector = SubtreeCollector { ids: Vec::new() };
    visit_tree(&mut collector, store, root)?;
    Ok(collector.ids)
}
