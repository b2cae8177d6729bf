//! # Fragments
//!
//! A fragment is rendered markup plus the static resources (styles and
//! scripts) that markup depends on. Parents merge child fragments into their
//! own; resource de-duplication happens here so composers never have to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Inline source text
    Text,
    /// Reference to an external file
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Head,
    Foot,
}

/// A static dependency declared by rendered markup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub mimetype: String,
    pub data: String,
    pub placement: Placement,
}

impl Resource {
    pub fn new(
        kind: ResourceKind,
        mimetype: impl Into<String>,
        data: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            kind,
            mimetype: mimetype.into(),
            data: data.into(),
            placement,
        }
    }

    /// Render as the HTML tag a page would include
    pub fn to_html(&self) -> String {
        match (self.mimetype.as_str(), self.kind) {
            ("text/css", ResourceKind::Text) => format!("<style type=\"text/css\">\n{}\n</style>", self.data),
            ("text/css", ResourceKind::Url) => {
                format!("<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">", self.data)
            }
            ("application/javascript", ResourceKind::Text) => {
                format!("<script>\n{}\n</script>", self.data)
            }
            ("application/javascript", ResourceKind::Url) => {
                format!("<script src=\"{}\" type=\"application/javascript\"></script>", self.data)
            }
            ("text/html", ResourceKind::Text) => self.data.clone(),
            _ => String::new(),
        }
    }
}

/// Rendered markup plus its resource dependencies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub content: String,
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js_init_fn: Option<String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn add_content(&mut self, content: &str) {
        self.content.push_str(content);
    }

    /// Add a resource unless an identical one is already declared
    pub fn add_resource(&mut self, resource: Resource) {
        if !self.resources.contains(&resource) {
            self.resources.push(resource);
        }
    }

    pub fn add_css(&mut self, text: impl Into<String>) {
        self.add_resource(Resource::new(ResourceKind::Text, "text/css", text, Placement::Head));
    }

    pub fn add_css_url(&mut self, url: impl Into<String>) {
        self.add_resource(Resource::new(ResourceKind::Url, "text/css", url, Placement::Head));
    }

    pub fn add_javascript(&mut self, text: impl Into<String>) {
        self.add_resource(Resource::new(
            ResourceKind::Text,
            "application/javascript",
            text,
            Placement::Foot,
        ));
    }

    pub fn add_javascript_url(&mut self, url: impl Into<String>) {
        self.add_resource(Resource::new(
            ResourceKind::Url,
            "application/javascript",
            url,
            Placement::Foot,
        ));
    }

    /// Merge another fragment's resources (not its content) into this one
    pub fn add_fragment_resources(&mut self, other: &Fragment) {
        for resource in &other.resources {
            self.add_resource(resource.clone());
        }
    }

    pub fn initialize_js(&mut self, js_init_fn: impl Into<String>) {
        self.js_init_fn = Some(js_init_fn.into());
    }

    pub fn head_html(&self) -> String {
        self.resources_html(Placement::Head)
    }

    pub fn foot_html(&self) -> String {
        self.resources_html(Placement::Foot)
    }

    fn resources_html(&self, placement: Placement) -> String {
        self.resources
            .iter()
            .filter(|r| r.placement == placement)
            .map(Resource::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
