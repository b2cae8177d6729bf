//! Integration tests for editor crate

use studio_editor::{
    save_block, BlockRegistry, BlockUpdate, EditorError, StudioConfig, StudioRuntime, StudioTemplates,
    ViewName,
};
use studio_model::{AuthoringContext, Block, BlockId, Capability, MemoryStore, User};

fn id(block_type: &str, name: &str) -> BlockId {
    BlockId::new("course-v1:Demo+101", block_type, name).unwrap()
}

fn staff() -> User {
    User::new(7, "staff")
}

/// unit ─┬─ html "a" (css resource)
///       ├─ vertical "inner" (author view) ── html "c"
///       └─ html "b" (same css resource as "a")
fn course() -> MemoryStore {
    let css = serde_json::json!([
        { "kind": "text", "mimetype": "text/css", "data": ".html{}", "placement": "head" }
    ]);

    let mut store = MemoryStore::new();
    store.seed([
        Block::new(id("vertical", "unit"))
            .with_capability(Capability::AuthorView)
            .with_capability(Capability::HasChildren)
            .with_children([id("html", "a"), id("vertical", "inner"), id("html", "b")]),
        Block::new(id("html", "a"))
            .with_content("data", "<p>A</p>")
            .with_content("resources", css.clone()),
        Block::new(id("vertical", "inner"))
            .with_capability(Capability::AuthorView)
            .with_children([id("html", "c")]),
        Block::new(id("html", "b"))
            .with_content("data", "<p>B</p>")
            .with_content("resources", css),
        Block::new(id("html", "c")).with_content("data", "<p>C</p>"),
    ]);
    store
}

#[test]
fn test_author_view_renders_children_in_order() {
    let store = course();
    let registry = BlockRegistry::new();
    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);

    let mut context = AuthoringContext::new();
    let fragment = runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut context)
        .unwrap();

    let a = fragment.content.find("<p>A</p>").unwrap();
    let c = fragment.content.find("<p>C</p>").unwrap();
    let b = fragment.content.find("<p>B</p>").unwrap();
    assert!(a < c && c < b);
    assert!(fragment.content.contains("xblock-author_view container"));
    assert!(fragment.content.contains("add-xblock-component"));
    assert_eq!(fragment.js_init_fn.as_deref(), Some("StudioContainer"));
}

#[test]
fn test_nested_container_shares_context() {
    let store = course();
    let registry = BlockRegistry::new();
    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);

    let mut context = AuthoringContext::new();
    runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut context)
        .unwrap();

    for name in [("html", "a"), ("vertical", "inner"), ("html", "b"), ("html", "c")] {
        assert!(context.is_reorderable(&id(name.0, name.1)), "{:?} not reorderable", name);
    }
    assert_eq!(context.can_add, Some(true));
}

#[test]
fn test_child_resources_merged_once() {
    let store = course();
    let registry = BlockRegistry::new();
    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);

    let mut context = AuthoringContext::new();
    let fragment = runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut context)
        .unwrap();

    assert_eq!(fragment.resources.len(), 1);
    assert!(fragment.head_html().contains(".html{}"));
}

#[test]
fn test_student_view_has_no_authoring_controls() {
    let store = course();
    let registry = BlockRegistry::new();
    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);

    let mut context = AuthoringContext::new();
    let fragment = runtime
        .render_block(&id("vertical", "unit"), ViewName::Student, &mut context)
        .unwrap();

    assert!(fragment.content.contains("<p>C</p>"));
    assert!(!fragment.content.contains("studio-xblock-children"));
    assert!(context.reorderable_items.is_empty());
    assert_eq!(context.can_add, None);
}

#[test]
fn test_dangling_child_fails_render() {
    let mut store = course();
    store.seed([Block::new(id("vertical", "broken")).with_children([id("html", "gone")])]);

    let registry = BlockRegistry::new();
    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);

    let err = runtime
        .render_block(&id("vertical", "broken"), ViewName::Author, &mut AuthoringContext::new())
        .unwrap_err();

    assert!(err.is_missing_block());
}

#[test]
fn test_configured_template_name_is_used() {
    let store = course();
    let registry = BlockRegistry::new();
    let config = StudioConfig {
        children_template: "custom_children.html".to_string(),
        ..StudioConfig::default()
    };

    // Template set still answers to the default name only
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);
    let err = runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut AuthoringContext::new())
        .unwrap_err();
    assert!(matches!(err, EditorError::TemplateNotFound(name) if name == "custom_children.html"));

    let templates = StudioTemplates::new(&config.children_template);
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);
    assert!(runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut AuthoringContext::new())
        .is_ok());
}

#[test]
fn test_config_loaded_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        StudioConfig::path_in(dir.path()),
        r#"{ "duplicateNamePrefix": "Copy of" }"#,
    )
    .unwrap();

    let config = StudioConfig::load(dir.path()).unwrap();

    assert_eq!(config.duplicate_name_prefix, "Copy of");
    assert!(config.is_detached("static_tab"));
}

#[test]
fn test_save_then_render_reflects_edit() {
    let mut store = course();
    let registry = BlockRegistry::new();

    let update = BlockUpdate::new()
        .set_content("data", "<p>A, edited</p>")
        .with_children(vec![]);
    save_block(&mut store, &registry, &staff(), &id("html", "a"), &update).unwrap();

    let reorder = BlockUpdate::new().with_children(vec![id("html", "b"), id("html", "a")]);
    save_block(&mut store, &registry, &staff(), &id("vertical", "unit"), &reorder).unwrap();

    let config = StudioConfig::default();
    let templates = StudioTemplates::default();
    let runtime = StudioRuntime::new(&store, &registry, &templates, &config);
    let fragment = runtime
        .render_block(&id("vertical", "unit"), ViewName::Author, &mut AuthoringContext::new())
        .unwrap();

    let b = fragment.content.find("<p>B</p>").unwrap();
    let a = fragment.content.find("<p>A, edited</p>").unwrap();
    assert!(b < a);
    assert!(!fragment.content.contains("<p>C</p>"));
    assert_eq!(store.edited_by(&id("vertical", "unit")), Some(7));
}
