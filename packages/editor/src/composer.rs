//! # Children Composer
//!
//! Renders a container's children for the authoring UI and composes them
//! into the container's fragment.
//!
//! ## Contract
//!
//! - Children are rendered strictly in tree order, each with its preview
//!   view (see [`select_view`]).
//! - Every child's resources are merged into the parent fragment; the
//!   fragment model removes duplicates.
//! - The children template is rendered once, after all children, and its
//!   markup is appended to the parent fragment.
//! - The context is shared by all children of one call: reorder marks and
//!   the add permission written for one child are visible to the next one
//!   and to the caller.
//! - Any failure (dangling child, child render, template) aborts the call
//!   before the template runs, so no partial composite is ever appended.

use crate::errors::EditorResult;
use crate::runtime::RenderRuntime;
use crate::template::ChildrenViewParams;
use crate::view::select_view;
use serde::{Deserialize, Serialize};
use studio_model::{AuthoringContext, Block, Fragment};
use tracing::{debug, info, instrument};

/// One rendered child, as handed to the children template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Canonical location string
    pub id: String,
    /// Rendered markup
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render children as drag-and-drop reorderable
    pub can_reorder: bool,
    /// Offer the add-component control
    pub can_add: bool,
}

impl RenderOptions {
    pub fn new(can_reorder: bool, can_add: bool) -> Self {
        Self {
            can_reorder,
            can_add,
        }
    }
}

/// Render `block`'s children into `fragment`
#[instrument(skip_all, fields(block = %block.id, can_reorder = options.can_reorder, can_add = options.can_add))]
pub fn render_children(
    block: &Block,
    runtime: &dyn RenderRuntime,
    context: &mut AuthoringContext,
    fragment: &mut Fragment,
    options: RenderOptions,
) -> EditorResult<()> {
    let children = runtime.children(block)?;
    let mut contents = Vec::with_capacity(children.len());

    for child in &children {
        if options.can_reorder {
            context.mark_reorderable(child.id.clone());
        }
        // Written per child: a child's own render may have changed it.
        context.can_add = Some(options.can_add);

        let view = select_view(child);
        debug!(child = %child.id, view = %view, "Rendering child");

        let rendered = runtime.render(child, view, context)?;
        fragment.add_fragment_resources(&rendered);

        contents.push(ContentRecord {
            id: child.id.to_string(),
            content: rendered.content,
        });
    }

    let params = ChildrenViewParams {
        items: &contents,
        xblock_context: context,
        can_add: options.can_add,
        can_reorder: options.can_reorder,
    }
    .to_value()?;

    let markup = runtime.render_template(&runtime.config().children_template, &params)?;
    fragment.add_content(&markup);

    info!(children = contents.len(), resources = fragment.resources.len(), "Rendered children");
    Ok(())
}
