//! Template text evaluation

use crate::error::{GeneratorError, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Evaluates the expressions embedded in a template's text
pub trait TemplateEngine {
    /// `name` identifies the template in error messages
    fn render(&self, name: &str, source: &str, context: &serde_json::Value) -> Result<String>;
}

/// minijinja-backed engine using the default `{{ }}` / `{% %}` syntax
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Undefined values render as empty strings
    pub fn new() -> Self {
        Self::with_undefined_behavior(UndefinedBehavior::Lenient)
    }

    /// Referencing an undefined value is an error
    pub fn strict() -> Self {
        Self::with_undefined_behavior(UndefinedBehavior::Strict)
    }

    fn with_undefined_behavior(behavior: UndefinedBehavior) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(behavior);
        // Output is source code and JSON, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, name: &str, source: &str, context: &serde_json::Value) -> Result<String> {
        self.env
            .render_named_str(name, source, minijinja::Value::from_serialize(context))
            .map_err(|e| GeneratorError::TemplateRender {
                name: name.to_string(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_substitutes_variables() {
        let output = JinjaEngine::new()
            .render(
                "LICENSE.md",
                "Copyright (c) {{ now.year }}. All rights reserved.\n",
                &json!({ "now": { "year": 1984 } }),
            )
            .unwrap();
        assert_eq!(output, "Copyright (c) 1984. All rights reserved.\n");
    }

    #[test]
    fn test_keeps_text_without_expressions() {
        let source = "{\n  \"My plugin\": \"Tooltip\"\n}";
        let output = JinjaEngine::new().render("contexts.json", source, &json!({})).unwrap();
        assert_eq!(output, source);
    }

    #[test]
    fn test_does_not_escape_json_templates() {
        let output = JinjaEngine::new()
            .render(
                "package.json",
                "\"name\": \"{{ packageName }}\"",
                &json!({ "packageName": "@foo/ckeditor5-<bar>" }),
            )
            .unwrap();
        assert_eq!(output, "\"name\": \"@foo/ckeditor5-<bar>\"");
    }

    #[test]
    fn test_lenient_undefined_renders_empty() {
        let output = JinjaEngine::new()
            .render(
                "package.json",
                ">={{ packageVersions.ckeditor5Inspector }}",
                &json!({ "packageVersions": { "ckeditor5": "30.0.0" } }),
            )
            .unwrap();
        assert_eq!(output, ">=");
    }

    #[test]
    fn test_strict_undefined_is_an_error() {
        let err = JinjaEngine::strict()
            .render(
                "package.json",
                ">={{ packageVersions.ckeditor5Inspector }}",
                &json!({ "packageVersions": { "ckeditor5": "30.0.0" } }),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::TemplateRender { ref name, .. } if name == "package.json"
        ));
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        let err = JinjaEngine::new()
            .render("index.js", "{{ packageName ", &json!({ "packageName": "x" }))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateRender { .. }));
    }
}
