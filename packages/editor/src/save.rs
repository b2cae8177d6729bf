//! # Save Pipeline
//!
//! Applies an authoring edit to a stored block:
//!
//! 1. Merge the update into a working copy
//! 2. `editor_saved` on the block type (may adjust fields, may refuse)
//! 3. Write
//! 4. `post_editor_saved` with the written block
//!
//! A refusal in step 2 leaves the store untouched.

use crate::errors::EditorResult;
use crate::registry::BlockRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_model::{Block, BlockId, BlockStore, Fields, User};
use tracing::{debug, instrument};

/// Field changes submitted by the authoring UI
///
/// A `null` value removes the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockUpdate {
    #[serde(default)]
    pub metadata: Fields,
    #[serde(default)]
    pub content: Fields,
    /// Replacement child order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BlockId>>,
}

impl BlockUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn set_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    pub fn clear_metadata(mut self, key: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), Value::Null);
        self
    }

    pub fn with_children(mut self, children: Vec<BlockId>) -> Self {
        self.children = Some(children);
        self
    }

    fn apply_to(&self, block: &mut Block) {
        merge_fields(&mut block.metadata, &self.metadata);
        merge_fields(&mut block.content, &self.content);
        if let Some(children) = &self.children {
            block.children = children.clone();
        }
    }
}

fn merge_fields(target: &mut Fields, changes: &Fields) {
    for (key, value) in changes {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Apply `update` to the block at `id` and run the save hooks around the write
#[instrument(skip_all, fields(block = %id))]
pub fn save_block(
    store: &mut dyn BlockStore,
    registry: &BlockRegistry,
    user: &User,
    id: &BlockId,
    update: &BlockUpdate,
) -> EditorResult<Block> {
    user.validate()?;

    let stored = store.get_item(id)?;
    let old_metadata = stored.metadata.clone();
    let old_content = stored.content.clone();
    let mut block = stored.clone();
    update.apply_to(&mut block);

    let kind = registry.kind_for(block.block_type());
    kind.editor_saved(&mut block, user, &old_metadata, &old_content)?;

    store.update_item(&block, user)?;
    debug!(kind = kind.name(), "Saved block");

    kind.post_editor_saved(&block, user, &old_metadata, &old_content);
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::StudioEditable;
    use crate::errors::EditorError;
    use crate::runtime::RenderRuntime;
    use crate::view::ViewName;
    use std::sync::{Arc, Mutex};
    use studio_model::{AuthoringContext, Fragment, MemoryStore};

    /// Records hook calls; upper-cases display names on save
    #[derive(Default)]
    struct Shouting {
        calls: Arc<Mutex<Vec<String>>>,
        refuse: bool,
    }

    impl StudioEditable for Shouting {
        fn name(&self) -> &'static str {
            "shouting"
        }

        fn render_view(
            &self,
            _block: &Block,
            _view: ViewName,
            _runtime: &dyn RenderRuntime,
            _context: &mut AuthoringContext,
        ) -> EditorResult<Fragment> {
            Ok(Fragment::new())
        }

        fn editor_saved(
            &self,
            block: &mut Block,
            _user: &User,
            old_metadata: &Fields,
            _old_content: &Fields,
        ) -> EditorResult<()> {
            self.calls.lock().unwrap().push(format!(
                "editor_saved old={}",
                old_metadata.get("display_name").and_then(|v| v.as_str()).unwrap_or("-")
            ));
            if self.refuse {
                return Err(EditorError::InvalidInput("read-only".to_string()));
            }
            if let Some(name) = block.display_name().map(str::to_uppercase) {
                block.set_display_name(name);
            }
            Ok(())
        }

        fn post_editor_saved(&self, block: &Block, _user: &User, _old_metadata: &Fields, _old_content: &Fields) {
            self.calls.lock().unwrap().push(format!(
                "post_editor_saved new={}",
                block.display_name().unwrap_or("-")
            ));
        }
    }

    fn id(name: &str) -> BlockId {
        BlockId::new("ctx", "html", name).unwrap()
    }

    fn staff() -> User {
        User::new(1, "staff")
    }

    fn setup(refuse: bool) -> (MemoryStore, BlockRegistry, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = BlockRegistry::empty();
        registry.register(
            "html",
            Shouting {
                calls: calls.clone(),
                refuse,
            },
        );

        let mut store = MemoryStore::new();
        store.seed([Block::new(id("intro"))
            .with_metadata("display_name", "Intro")
            .with_content("data", "<p>hi</p>")]);

        (store, registry, calls)
    }

    #[test]
    fn test_hooks_run_around_write() {
        let (mut store, registry, calls) = setup(false);
        let update = BlockUpdate::new().set_metadata("display_name", "Welcome");

        let saved = save_block(&mut store, &registry, &staff(), &id("intro"), &update).unwrap();

        assert_eq!(saved.display_name(), Some("WELCOME"));
        assert_eq!(store.get_item(&id("intro")).unwrap().display_name(), Some("WELCOME"));
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["editor_saved old=Intro", "post_editor_saved new=WELCOME"]
        );
        assert_eq!(store.edited_by(&id("intro")), Some(1));
    }

    #[test]
    fn test_refused_save_leaves_store_untouched() {
        let (mut store, registry, calls) = setup(true);
        let update = BlockUpdate::new().set_metadata("display_name", "Welcome");

        let err = save_block(&mut store, &registry, &staff(), &id("intro"), &update).unwrap_err();

        assert!(matches!(err, EditorError::InvalidInput(_)));
        assert_eq!(store.version, 0);
        assert_eq!(store.get_item(&id("intro")).unwrap().display_name(), Some("Intro"));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_null_removes_field() {
        let (mut store, registry, _calls) = setup(false);
        let update = BlockUpdate::new().clear_metadata("display_name").set_content("data", "<p>bye</p>");

        let saved = save_block(&mut store, &registry, &staff(), &id("intro"), &update).unwrap();

        assert_eq!(saved.display_name(), None);
        assert_eq!(saved.content.get("data"), Some(&Value::from("<p>bye</p>")));
    }

    #[test]
    fn test_update_parses_from_json() {
        let update: BlockUpdate = serde_json::from_str(
            r#"{ "metadata": { "display_name": null }, "children": ["block-v1:ctx+type@html+block@a"] }"#,
        )
        .unwrap();

        assert_eq!(update.metadata.get("display_name"), Some(&Value::Null));
        assert_eq!(update.children, Some(vec![id("a")]));
        assert!(update.content.is_empty());
    }

    #[test]
    fn test_anonymous_user_rejected() {
        let (mut store, registry, calls) = setup(false);

        let err = save_block(&mut store, &registry, &User::new(0, ""), &id("intro"), &BlockUpdate::new()).unwrap_err();

        assert!(matches!(err, EditorError::Model(_)));
        assert!(calls.lock().unwrap().is_empty());
    }
}
