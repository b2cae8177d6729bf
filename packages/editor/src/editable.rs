//! # Studio-Editable Blocks
//!
//! Behaviour a block type exposes to the authoring UI. Every method except
//! [`StudioEditable::render_view`] has a default; block types override only
//! what they need.
//!
//! ## Hooks
//!
//! The persistence layer drives the save hooks in a fixed order:
//!
//! ```text
//! editor_saved (may adjust fields) → write → post_editor_saved
//! ```
//!
//! The duplication engine calls [`StudioEditable::studio_post_duplicate`]
//! right after creating the copy; its return value tells the engine whether
//! children still need copying.

use crate::composer::{self, RenderOptions};
use crate::duplicate::{self, ChildrenHandling, Duplicator};
use crate::errors::EditorResult;
use crate::runtime::RenderRuntime;
use crate::view::ViewName;
use studio_model::{AuthoringContext, Block, BlockId, BlockStore, Fields, Fragment, User};
use tracing::instrument;

pub trait StudioEditable: Send + Sync {
    /// Debug name of the block type behaviour
    fn name(&self) -> &'static str;

    /// Render one view of `block`
    fn render_view(
        &self,
        block: &Block,
        view: ViewName,
        runtime: &dyn RenderRuntime,
        context: &mut AuthoringContext,
    ) -> EditorResult<Fragment>;

    /// Render `block`'s children into `fragment` for the authoring UI
    fn render_children(
        &self,
        block: &Block,
        runtime: &dyn RenderRuntime,
        context: &mut AuthoringContext,
        fragment: &mut Fragment,
        options: RenderOptions,
    ) -> EditorResult<()> {
        composer::render_children(block, runtime, context, fragment, options)
    }

    /// Called right before `block` is written. May modify fields.
    fn editor_saved(
        &self,
        _block: &mut Block,
        _user: &User,
        _old_metadata: &Fields,
        _old_content: &Fields,
    ) -> EditorResult<()> {
        Ok(())
    }

    /// Called right after `block` was written
    fn post_editor_saved(
        &self,
        _block: &Block,
        _user: &User,
        _old_metadata: &Fields,
        _old_content: &Fields,
    ) {
    }

    /// Called on the new copy `dest` once it exists in `store`
    #[instrument(skip_all, fields(kind = self.name(), dest = %dest, source = %source.id, shallow = shallow))]
    fn studio_post_duplicate(
        &self,
        dest: &BlockId,
        source: &Block,
        store: &mut dyn BlockStore,
        user: &User,
        duplicator: &dyn Duplicator,
        shallow: bool,
    ) -> EditorResult<ChildrenHandling> {
        user.validate()?;
        self.handle_children_duplication(dest, source, store, user, duplicator, shallow)?;
        Ok(ChildrenHandling::Handled)
    }

    fn handle_children_duplication(
        &self,
        dest: &BlockId,
        source: &Block,
        store: &mut dyn BlockStore,
        user: &User,
        duplicator: &dyn Duplicator,
        shallow: bool,
    ) -> EditorResult<()> {
        duplicate::handle_children_duplication(dest, source, store, user, duplicator, shallow)
    }
}
