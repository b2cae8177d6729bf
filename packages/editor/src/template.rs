//! # Templates
//!
//! Composite markup (the wrapper around a container's rendered children) is
//! produced by a [`TemplateService`]. Hosts can plug in any engine; the
//! built-in [`StudioTemplates`] renders the children view directly.

use crate::composer::ContentRecord;
use crate::errors::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_model::AuthoringContext;

/// Renders named templates with JSON parameters
pub trait TemplateService: Send + Sync {
    fn render_template(&self, name: &str, params: &Value) -> EditorResult<String>;
}

/// Parameters of the children view, as passed by the composer
#[derive(Debug, Serialize)]
pub struct ChildrenViewParams<'a> {
    pub items: &'a [ContentRecord],
    pub xblock_context: &'a AuthoringContext,
    pub can_add: bool,
    pub can_reorder: bool,
}

impl ChildrenViewParams<'_> {
    pub fn to_value(&self) -> EditorResult<Value> {
        serde_json::to_value(self).map_err(|e| EditorError::Template {
            template: "children view".to_string(),
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChildrenView {
    items: Vec<ContentRecord>,
    #[serde(default)]
    xblock_context: AuthoringContext,
    #[serde(default)]
    can_add: bool,
    #[serde(default)]
    can_reorder: bool,
}

/// Output buffer with indentation, one line per call
struct Buffer {
    indent: &'static str,
    depth: usize,
    output: String,
}

impl Buffer {
    fn new() -> Self {
        Self {
            indent: "  ",
            depth: 0,
            output: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(self.indent);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Embed pre-rendered markup byte for byte, then start a new line
    fn add_raw(&mut self, markup: &str) {
        self.output.push_str(markup);
        if !markup.is_empty() && !markup.ends_with('\n') {
            self.output.push('\n');
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}

/// Built-in template set for the authoring UI
#[derive(Debug, Clone)]
pub struct StudioTemplates {
    children_template: String,
}

impl StudioTemplates {
    pub fn new(children_template: impl Into<String>) -> Self {
        Self {
            children_template: children_template.into(),
        }
    }

    fn render_children_view(&self, params: &Value) -> EditorResult<String> {
        let view = ChildrenView::deserialize(params).map_err(|e| EditorError::Template {
            template: self.children_template.clone(),
            message: e.to_string(),
        })?;

        let mut buffer = Buffer::new();

        let mut classes = String::from("studio-xblock-children");
        if view.can_reorder {
            classes.push_str(" reorderable-container");
        }
        buffer.add_line(&format!(
            "<div class=\"{}\" data-can-add=\"{}\">",
            classes, view.can_add
        ));
        buffer.indent();

        for item in &view.items {
            let draggable = view
                .xblock_context
                .reorderable_items
                .iter()
                .any(|id| id.to_string() == item.id);
            let class = if draggable {
                "studio-xblock-wrapper is-draggable"
            } else {
                "studio-xblock-wrapper"
            };

            buffer.add_line(&format!(
                "<div class=\"{}\" data-locator=\"{}\">",
                class,
                escape_html(&item.id)
            ));
            // child markup is already rendered html; whitespace may be significant
            buffer.add_raw(&item.content);
            buffer.add_line("</div>");
        }

        if view.can_add {
            buffer.add_line("<div class=\"add-xblock-component new-component-item\"></div>");
        }

        buffer.dedent();
        buffer.add_line("</div>");

        Ok(buffer.output)
    }
}

impl Default for StudioTemplates {
    fn default() -> Self {
        Self::new(crate::config::CHILDREN_VIEW_TEMPLATE)
    }
}

impl TemplateService for StudioTemplates {
    fn render_template(&self, name: &str, params: &Value) -> EditorResult<String> {
        if name == self.children_template {
            self.render_children_view(params)
        } else {
            Err(EditorError::TemplateNotFound(name.to_string()))
        }
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
