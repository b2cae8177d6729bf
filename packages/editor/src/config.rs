use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "studio.config.json";
pub const CHILDREN_VIEW_TEMPLATE: &str = "studio_render_children_view.html";

/// Authoring configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    /// Template used to wrap rendered children
    #[serde(default = "default_children_template")]
    pub children_template: String,

    /// Block types that are never bound into a parent when duplicated
    #[serde(default = "default_detached_block_types")]
    pub detached_block_types: Vec<String>,

    /// Prefix for display names of top-level duplicates
    #[serde(default = "default_duplicate_name_prefix")]
    pub duplicate_name_prefix: String,
}

fn default_children_template() -> String {
    CHILDREN_VIEW_TEMPLATE.to_string()
}

fn default_detached_block_types() -> Vec<String> {
    ["static_tab", "course_info", "about"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_duplicate_name_prefix() -> String {
    "Duplicate of".to_string()
}

impl StudioConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = Self::path_in(dir);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: StudioConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(StudioConfig::default())
        }
    }

    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(DEFAULT_CONFIG_NAME)
    }

    pub fn is_detached(&self, block_type: &str) -> bool {
        self.detached_block_types.iter().any(|t| t == block_type)
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            children_template: default_children_template(),
            detached_block_types: default_detached_block_types(),
            duplicate_name_prefix: default_duplicate_name_prefix(),
        }
    }
}
