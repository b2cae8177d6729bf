//! # Render Runtime
//!
//! The services a render call needs: child loading, per-block view
//! rendering, template rendering and configuration. Composers only see the
//! [`RenderRuntime`] trait, so tests can swap in a mock.

use crate::config::StudioConfig;
use crate::errors::EditorResult;
use crate::registry::BlockRegistry;
use crate::template::TemplateService;
use crate::view::ViewName;
use serde_json::Value;
use studio_model::{AuthoringContext, Block, BlockId, BlockStore, Fragment};

pub trait RenderRuntime {
    /// Load `block`'s children in tree order
    fn children(&self, block: &Block) -> EditorResult<Vec<Block>>;

    /// Render one view of `block`
    fn render(
        &self,
        block: &Block,
        view: ViewName,
        context: &mut AuthoringContext,
    ) -> EditorResult<Fragment>;

    fn render_template(&self, name: &str, params: &Value) -> EditorResult<String>;

    fn config(&self) -> &StudioConfig;
}

/// Runtime backed by a store and a block-type registry
pub struct StudioRuntime<'a> {
    store: &'a dyn BlockStore,
    registry: &'a BlockRegistry,
    templates: &'a dyn TemplateService,
    config: &'a StudioConfig,
}

impl<'a> StudioRuntime<'a> {
    pub fn new(
        store: &'a dyn BlockStore,
        registry: &'a BlockRegistry,
        templates: &'a dyn TemplateService,
        config: &'a StudioConfig,
    ) -> Self {
        Self {
            store,
            registry,
            templates,
            config,
        }
    }

    /// Render a stored block by location with a fresh fragment
    pub fn render_block(
        &self,
        id: &BlockId,
        view: ViewName,
        context: &mut AuthoringContext,
    ) -> EditorResult<Fragment> {
        let block = self.store.get_item(id)?;
        self.render(block, view, context)
    }
}

impl RenderRuntime for StudioRuntime<'_> {
    fn children(&self, block: &Block) -> EditorResult<Vec<Block>> {
        Ok(self.store.get_children(block)?)
    }

    fn render(
        &self,
        block: &Block,
        view: ViewName,
        context: &mut AuthoringContext,
    ) -> EditorResult<Fragment> {
        self.registry
            .kind_for(block.block_type())
            .render_view(block, view, self, context)
    }

    fn render_template(&self, name: &str, params: &Value) -> EditorResult<String> {
        self.templates.render_template(name, params)
    }

    fn config(&self) -> &StudioConfig {
        self.config
    }
}
