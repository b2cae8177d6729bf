//! Request-scoped authoring context
//!
//! One context is created per render request and threaded by `&mut` through
//! the whole tree walk. Changes made while rendering one child are visible
//! to later siblings and to the caller, never to other requests.

use crate::block::Fields;
use crate::id::BlockId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoringContext {
    /// Children the author may drag to reorder
    #[serde(default)]
    pub reorderable_items: BTreeSet<BlockId>,

    /// Whether the author may add new children; unset until a composer runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_add: Option<bool>,

    /// Any other rendering options
    #[serde(default)]
    pub options: Fields,
}

impl AuthoringContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_reorderable(&mut self, id: BlockId) {
        self.reorderable_items.insert(id);
    }

    pub fn is_reorderable(&self, id: &BlockId) -> bool {
        self.reorderable_items.contains(id)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.options.insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = AuthoringContext::new();
        assert!(ctx.reorderable_items.is_empty());
        assert_eq!(ctx.can_add, None);
        assert!(ctx.get("is_unit_page").is_none());
    }

    #[test]
    fn test_options_round_trip_through_json() {
        let mut ctx = AuthoringContext::new();
        ctx.set("is_unit_page", true);
        ctx.mark_reorderable(BlockId::new("ctx", "html", "a").unwrap());
        ctx.can_add = Some(false);

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["options"]["is_unit_page"], Value::Bool(true));
        assert_eq!(json["can_add"], Value::Bool(false));
        assert_eq!(
            json["reorderable_items"][0],
            Value::String("block-v1:ctx+type@html+block@a".to_string())
        );
    }
}
