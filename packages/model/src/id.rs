//! Block locations
//!
//! A location names one block inside one course or library context. The
//! canonical string form is the one authoring UIs put in `data-locator`
//! attributes: `block-v1:{context}+type@{block_type}+block@{block_id}`.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const LOCATION_PREFIX: &str = "block-v1:";
const TYPE_MARKER: &str = "+type@";
const BLOCK_MARKER: &str = "+block@";

/// Stable identity of a block in the content tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId {
    context: String,
    block_type: String,
    block_id: String,
}

impl BlockId {
    /// Create a location, rejecting empty parts
    pub fn new(
        context: impl Into<String>,
        block_type: impl Into<String>,
        block_id: impl Into<String>,
    ) -> ModelResult<Self> {
        let id = Self {
            context: context.into(),
            block_type: block_type.into(),
            block_id: block_id.into(),
        };

        if id.context.is_empty() || id.block_type.is_empty() || id.block_id.is_empty() {
            return Err(ModelError::InvalidLocation(id.to_string()));
        }

        Ok(id)
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    /// Same context and type, different block id
    pub fn with_block_id(&self, block_id: impl Into<String>) -> ModelResult<Self> {
        Self::new(self.context.clone(), self.block_type.clone(), block_id)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}",
            LOCATION_PREFIX, self.context, TYPE_MARKER, self.block_type, BLOCK_MARKER, self.block_id
        )
    }
}

impl FromStr for BlockId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidLocation(s.to_string());

        let rest = s.strip_prefix(LOCATION_PREFIX).ok_or_else(invalid)?;
        let (context, rest) = rest.split_once(TYPE_MARKER).ok_or_else(invalid)?;
        let (block_type, block_id) = rest.split_once(BLOCK_MARKER).ok_or_else(invalid)?;

        Self::new(context, block_type, block_id).map_err(|_| invalid())
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
