//! Email template management with Handlebars
//!
//! `{{value}}` is HTML-escaped, which is what HTML bodies want. Text bodies
//! and subjects should use `{{{value}}}` to keep input verbatim.

use crate::error::{EmailError, EmailResult};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::HashMap;

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Email template definition
#[derive(Clone, Debug)]
pub struct EmailTemplate {
    pub name: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

/// Handlebars-based template engine
///
/// Supports:
/// - Variables: `{{name}}`
/// - Conditionals: `{{#if condition}}...{{else}}...{{/if}}`
/// - Loops: `{{#each items}}...{{/each}}`
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        Self {
            handlebars,
            templates: HashMap::new(),
        }
    }

    /// Register a template, replacing any previous one with the same name
    pub fn register(&mut self, template: EmailTemplate) -> EmailResult<()> {
        self.register_part(&template.name, "subject", Some(&template.subject))?;
        self.register_part(&template.name, "text", template.body_text.as_deref())?;
        self.register_part(&template.name, "html", template.body_html.as_deref())?;

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    fn register_part(&mut self, name: &str, part: &str, source: Option<&str>) -> EmailResult<()> {
        if let Some(source) = source {
            self.handlebars
                .register_template_string(&format!("{}_{}", name, part), source)
                .map_err(|e| {
                    EmailError::Template(format!("Failed to register {} {}: {}", name, part, e))
                })?;
        }
        Ok(())
    }

    /// Render a template by name
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> EmailResult<RenderedTemplate> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| EmailError::Template(format!("Template not found: {}", name)))?;

        let render_part = |part: &str| {
            self.handlebars
                .render(&format!("{}_{}", name, part), data)
                .map_err(|e| EmailError::Template(format!("Failed to render {} {}: {}", name, part, e)))
        };

        Ok(RenderedTemplate {
            subject: render_part("subject")?,
            body_text: template
                .body_text
                .as_ref()
                .map(|_| render_part("text"))
                .transpose()?,
            body_html: template
                .body_html
                .as_ref()
                .map(|_| render_part("html"))
                .transpose()?,
        })
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> TemplateEngine {
        let mut engine = TemplateEngine::new();
        engine
            .register(EmailTemplate {
                name: "greeting".to_string(),
                subject: "Hello {{{name}}}".to_string(),
                body_text: Some("Hi {{{name}}}{{#if phone}} ({{{phone}}}){{/if}}".to_string()),
                body_html: Some("<p>Hi {{name}}</p>".to_string()),
            })
            .unwrap();
        engine
    }

    #[test]
    fn test_render_all_parts() {
        let rendered = engine()
            .render("greeting", &json!({ "name": "Ann & Bo", "phone": "555" }))
            .unwrap();

        assert_eq!(rendered.subject, "Hello Ann & Bo");
        assert_eq!(rendered.body_text.as_deref(), Some("Hi Ann & Bo (555)"));
        assert_eq!(rendered.body_html.as_deref(), Some("<p>Hi Ann &amp; Bo</p>"));
    }

    #[test]
    fn test_html_escapes_markup() {
        let rendered = engine()
            .render("greeting", &json!({ "name": "<script>alert(1)</script>" }))
            .unwrap();

        let html = rendered.body_html.unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template() {
        let err = engine().render("missing", &json!({})).unwrap_err();
        assert!(matches!(err, EmailError::Template(_)));
        assert!(!engine().has_template("missing"));
    }

    #[test]
    fn test_invalid_template_source() {
        let mut engine = TemplateEngine::new();
        let result = engine.register(EmailTemplate {
            name: "broken".to_string(),
            subject: "{{#if}}".to_string(),
            body_text: None,
            body_html: None,
        });
        assert!(result.is_err());
        assert!(!engine.has_template("broken"));
    }
}
