//! # Block-Type Registry
//!
//! Maps block types to their [`StudioEditable`] behaviour. Block types with
//! custom duplication or render logic register their own implementation;
//! unknown types fall back to [`LeafBlock`].

use crate::composer::RenderOptions;
use crate::editable::StudioEditable;
use crate::errors::{EditorError, EditorResult};
use crate::runtime::RenderRuntime;
use crate::template::escape_html;
use crate::view::ViewName;
use std::collections::HashMap;
use std::sync::Arc;
use studio_model::{AuthoringContext, Block, Fragment, Resource};

/// Block types rendered as containers by default
pub const CONTAINER_BLOCK_TYPES: &[&str] = &[
    "course",
    "chapter",
    "sequential",
    "vertical",
    "split_test",
    "library_content",
    "itembank",
];

pub struct BlockRegistry {
    kinds: HashMap<String, Arc<dyn StudioEditable>>,
    fallback: Arc<dyn StudioEditable>,
}

impl BlockRegistry {
    /// Registry with the built-in container types
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let container: Arc<dyn StudioEditable> = Arc::new(ContainerBlock);
        for block_type in CONTAINER_BLOCK_TYPES {
            registry.register_arc(*block_type, container.clone());
        }
        registry
    }

    /// Registry where every type uses the fallback
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
            fallback: Arc::new(LeafBlock),
        }
    }

    pub fn register(&mut self, block_type: impl Into<String>, kind: impl StudioEditable + 'static) {
        self.register_arc(block_type, Arc::new(kind));
    }

    pub fn register_arc(&mut self, block_type: impl Into<String>, kind: Arc<dyn StudioEditable>) {
        self.kinds.insert(block_type.into(), kind);
    }

    pub fn set_fallback(&mut self, kind: impl StudioEditable + 'static) {
        self.fallback = Arc::new(kind);
    }

    pub fn is_registered(&self, block_type: &str) -> bool {
        self.kinds.contains_key(block_type)
    }

    pub fn kind_for(&self, block_type: &str) -> &dyn StudioEditable {
        self.kinds
            .get(block_type)
            .unwrap_or(&self.fallback)
            .as_ref()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A block whose author view lists its children for editing
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerBlock;

impl StudioEditable for ContainerBlock {
    fn name(&self) -> &'static str {
        "container"
    }

    fn render_view(
        &self,
        block: &Block,
        view: ViewName,
        runtime: &dyn RenderRuntime,
        context: &mut AuthoringContext,
    ) -> EditorResult<Fragment> {
        let mut fragment = Fragment::new();
        fragment.add_content(&format!(
            "<div class=\"xblock xblock-{} container\" data-locator=\"{}\">\n",
            view,
            escape_html(&block.id.to_string())
        ));

        match view {
            ViewName::Author => {
                self.render_children(block, runtime, context, &mut fragment, RenderOptions::new(true, true))?;
                fragment.initialize_js("StudioContainer");
            }
            ViewName::Student => {
                for child in runtime.children(block)? {
                    let rendered = runtime.render(&child, ViewName::Student, context)?;
                    fragment.add_fragment_resources(&rendered);
                    fragment.add_content(&rendered.content);
                }
            }
        }

        fragment.add_content("</div>\n");
        Ok(fragment)
    }
}

/// A block without children that renders its `data` content field
///
/// Resources listed under the `resources` content field are declared on
/// every rendered fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeafBlock;

impl StudioEditable for LeafBlock {
    fn name(&self) -> &'static str {
        "leaf"
    }

    fn render_view(
        &self,
        block: &Block,
        view: ViewName,
        _runtime: &dyn RenderRuntime,
        _context: &mut AuthoringContext,
    ) -> EditorResult<Fragment> {
        let mut fragment = Fragment::new();

        if let Some(resources) = block.content.get("resources") {
            let resources: Vec<Resource> =
                serde_json::from_value(resources.clone()).map_err(|e| EditorError::Render {
                    block: block.id.to_string(),
                    message: format!("invalid resources: {}", e),
                })?;
            for resource in resources {
                fragment.add_resource(resource);
            }
        }

        // `data` holds author-supplied html and is emitted as-is
        let data = block
            .content
            .get("data")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        fragment.add_content(&format!(
            "<div class=\"xblock xblock-{}\" data-block-type=\"{}\" data-usage-id=\"{}\">{}</div>",
            view,
            escape_html(block.block_type()),
            escape_html(&block.id.to_string()),
            data
        ));

        Ok(fragment)
    }
}
