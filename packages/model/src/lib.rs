//! # Studio Model
//!
//! Content-tree data model shared by the authoring crates.
//!
//! ```text
//! BlockStore ──get_item──▶ Block { id, metadata, content, children, capabilities }
//!                             │
//!                             └─ children: Vec<BlockId>  (tree order)
//!
//! render call ──▶ AuthoringContext (request-scoped)  +  Fragment (markup + resources)
//! ```

pub mod block;
pub mod context;
pub mod error;
pub mod fragment;
pub mod id;
pub mod store;
pub mod user;
pub mod visitor;

pub use block::{Block, Capabilities, Capability, Fields, COPIED_FROM_FIELD, DISPLAY_NAME_FIELD};
pub use context::AuthoringContext;
pub use error::{ModelError, ModelResult};
pub use fragment::{Fragment, Placement, Resource, ResourceKind};
pub use id::BlockId;
pub use store::{BlockStore, MemoryStore};
pub use user::User;
pub use visitor::{collect_subtree, visit_tree, walk_block, BlockVisitor};
