//! # Duplication Engine
//!
//! Generic, type-agnostic duplication of a block and (unless shallow) its
//! subtree.
//!
//! ## Lifecycle
//!
//! ```text
//! load source → gather attributes → create copy
//!     → block type's studio_post_duplicate ──Handled──────────┐
//!                         │                                    │
//!                    NotHandled → engine copies children       │
//!                         │                                    │
//!                         └──────────→ bind copy into parent ←─┘
//!                                            → notify listeners
//! ```
//!
//! The engine is also the [`Duplicator`] handed to block types, so copying
//! a child recurses through the same lifecycle with `is_child` set.

use crate::config::StudioConfig;
use crate::duplicate::{handle_children_duplication, Duplicator};
use crate::errors::EditorResult;
use crate::registry::BlockRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_model::{Block, BlockId, BlockStore, ModelError, User, COPIED_FROM_FIELD};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// What to duplicate and where to put it
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateRequest {
    /// Block the copy is bound under
    pub parent: BlockId,
    /// Block being copied
    pub source: BlockId,
    /// Location for the copy; a fresh one is minted when absent
    pub dest: Option<BlockId>,
    /// Display name for the copy
    pub display_name: Option<String>,
    /// Copy only this block, not its descendants
    pub shallow: bool,
    /// The copy is part of a parent's duplication
    pub is_child: bool,
}

impl DuplicateRequest {
    pub fn new(source: BlockId, parent: BlockId) -> Self {
        Self {
            parent,
            source,
            dest: None,
            display_name: None,
            shallow: false,
            is_child: false,
        }
    }

    pub fn with_dest(mut self, dest: BlockId) -> Self {
        self.dest = Some(dest);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    pub fn as_child(mut self) -> Self {
        self.is_child = true;
        self
    }
}

/// Emitted once per block copied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatedEvent {
    pub usage_key: BlockId,
    pub block_type: String,
    pub source_usage_key: BlockId,
    pub time: DateTime<Utc>,
}

/// Receives duplication events
pub trait DuplicationListener {
    fn on_duplicated(&self, event: &DuplicatedEvent);
}

impl<F> DuplicationListener for F
where
    F: Fn(&DuplicatedEvent),
{
    fn on_duplicated(&self, event: &DuplicatedEvent) {
        self(event)
    }
}

pub struct DuplicationEngine<'a> {
    registry: &'a BlockRegistry,
    config: &'a StudioConfig,
    listeners: Vec<Box<dyn DuplicationListener + 'a>>,
}

impl<'a> DuplicationEngine<'a> {
    pub fn new(registry: &'a BlockRegistry, config: &'a StudioConfig) -> Self {
        Self {
            registry,
            config,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: impl DuplicationListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Duplicate `request.source` under `request.parent`; returns the copy's location
    #[instrument(skip_all, fields(source = %request.source, parent = %request.parent, shallow = request.shallow, is_child = request.is_child))]
    pub fn duplicate(
        &self,
        request: &DuplicateRequest,
        store: &mut dyn BlockStore,
        user: &User,
    ) -> EditorResult<BlockId> {
        user.validate()?;

        let source = store.get_item(&request.source)?.clone();
        let dest_id = match &request.dest {
            Some(dest) => dest.clone(),
            None => source.id.with_block_id(Uuid::new_v4().simple().to_string())?,
        };

        // Detached types and block behaviour follow the destination's type
        let detached = self.config.is_detached(dest_id.block_type());
        if !detached && !store.has_item(&request.parent) {
            return Err(ModelError::MissingBlock(request.parent.to_string()).into());
        }

        let dest = self.gather_attributes(&source, dest_id, request);
        let dest_id = store.create_item(dest, user)?;

        let kind = self.registry.kind_for(dest_id.block_type());
        let handling = kind.studio_post_duplicate(&dest_id, &source, store, user, self, request.shallow)?;
        if !handling.is_handled() && !request.shallow {
            debug!(kind = kind.name(), "Block type left children to the engine");
            handle_children_duplication(&dest_id, &source, store, user, self, false)?;
        }

        if !detached {
            let mut parent = store.get_item(&request.parent)?.clone();
            if parent.insert_child_after(&source.id, dest_id.clone()) {
                store.update_item(&parent, user)?;
            }
        }

        let event = DuplicatedEvent {
            usage_key: dest_id.clone(),
            block_type: dest_id.block_type().to_string(),
            source_usage_key: source.id.clone(),
            time: Utc::now(),
        };
        for listener in &self.listeners {
            listener.on_duplicated(&event);
        }

        if request.is_child {
            debug!(dest = %dest_id, "Duplicated child block");
        } else {
            info!(dest = %dest_id, block_type = dest_id.block_type(), "Duplicated block");
        }

        Ok(dest_id)
    }

    /// Copy of `source`'s fields for the new location, without children
    fn gather_attributes(&self, source: &Block, dest_id: BlockId, request: &DuplicateRequest) -> Block {
        let mut dest = Block::new(dest_id);
        dest.metadata = source.metadata.clone();
        dest.content = source.content.clone();
        dest.capabilities = source.capabilities.clone();
        dest.metadata.insert(
            COPIED_FROM_FIELD.to_string(),
            Value::String(source.id.to_string()),
        );

        match &request.display_name {
            Some(name) => dest.set_display_name(name.clone()),
            None if !request.is_child => {
                let prefix = &self.config.duplicate_name_prefix;
                let name = match source.display_name() {
                    Some(name) => format!("{} '{}'", prefix, name),
                    None => format!("{} {}", prefix, source.block_type()),
                };
                dest.set_display_name(name);
            }
            None => {}
        }

        dest
    }
}

impl Duplicator for DuplicationEngine<'_> {
    fn duplicate(
        &self,
        child: &BlockId,
        new_parent: &BlockId,
        store: &mut dyn BlockStore,
        user: &User,
    ) -> EditorResult<BlockId> {
        let request = DuplicateRequest::new(child.clone(), new_parent.clone()).as_child();
        DuplicationEngine::duplicate(self, &request, store, user)
    }
}
