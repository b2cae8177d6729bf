//! # Studio Editor
//!
//! Authoring behaviour for container blocks: rendering a block's children
//! for the editing UI, duplicating subtrees, and the save hooks.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Block, BlockStore, Fragment, context │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - registry: block type → StudioEditable    │
//! │  - composer: children → one container view  │
//! │  - duplicate/engine: copy a subtree once    │
//! │  - save: editor_saved → write → post hook   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ templates: children view markup             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Rendering a container for authors
//!
//! ```rust,ignore
//! use studio_editor::{BlockRegistry, StudioConfig, StudioRuntime, StudioTemplates, ViewName};
//! use studio_model::AuthoringContext;
//!
//! let config = StudioConfig::load(".")?;
//! let registry = BlockRegistry::new();
//! let templates = StudioTemplates::new(&config.children_template);
//! let runtime = StudioRuntime::new(&store, &registry, &templates, &config);
//!
//! let mut context = AuthoringContext::new();
//! let fragment = runtime.render_block(&unit_id, ViewName::Author, &mut context)?;
//! ```
//!
//! ### Duplicating a subtree
//!
//! ```rust,ignore
//! use studio_editor::{DuplicateRequest, DuplicationEngine};
//!
//! let engine = DuplicationEngine::new(&registry, &config);
//! let copy = engine.duplicate(&DuplicateRequest::new(unit_id, section_id), &mut store, &user)?;
//! ```

mod composer;
mod config;
mod duplicate;
mod editable;
mod engine;
mod errors;
mod registry;
mod runtime;
mod save;
mod template;
mod view;

pub use composer::{render_children, ContentRecord, RenderOptions};
pub use config::{StudioConfig, CHILDREN_VIEW_TEMPLATE, DEFAULT_CONFIG_NAME};
pub use duplicate::{handle_children_duplication, ChildrenHandling, Duplicator};
pub use editable::StudioEditable;
pub use engine::{DuplicateRequest, DuplicatedEvent, DuplicationEngine, DuplicationListener};
pub use errors::{EditorError, EditorResult};
pub use registry::{BlockRegistry, ContainerBlock, LeafBlock, CONTAINER_BLOCK_TYPES};
pub use runtime::{RenderRuntime, StudioRuntime};
pub use save::{save_block, BlockUpdate};
pub use template::{escape_html, ChildrenViewParams, StudioTemplates, TemplateService};
pub use view::{has_author_view, select_view, ViewName, AUTHOR_VIEW, STUDENT_VIEW};
