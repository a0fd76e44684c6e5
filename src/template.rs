//! Template interpolation for SQL statements
//!
//! Handles `{{ variable }}` interpolation in the static SQL templates.
//! Supports nested access like `{{ s3.log_data }}` and `{{ iam_role.arn }}`.

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

/// Regex for matching template variables: {{ variable.path }}
static TEMPLATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)\s*\}\}")
        .expect("template regex is valid")
});

/// Context for template interpolation
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// Root of the variable tree
    pub vars: Value,
}

impl TemplateContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create context over a variable tree
    pub fn with_vars(vars: Value) -> Self {
        Self { vars }
    }

    /// Get a value by path (e.g., "s3.log_data")
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.vars;
        for part in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

/// Render a template string with the given context
pub fn render(template: &str, ctx: &TemplateContext) -> Result<String> {
    render_with(template, ctx, value_to_string)
}

/// Render a SQL template: strings become quoted literals, numbers stay bare
pub fn render_sql(template: &str, ctx: &TemplateContext) -> Result<String> {
    render_with(template, ctx, |value| match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => quote_literal(&value_to_string(other)),
    })
}

fn render_with(
    template: &str,
    ctx: &TemplateContext,
    format: impl Fn(&Value) -> String,
) -> Result<String> {
    let mut errors = Vec::new();

    let result = TEMPLATE_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let var_path = &cap[1];
        match ctx.get(var_path) {
            Some(value) => format(value),
            None => {
                errors.push(var_path.to_string());
                cap[0].to_string()
            }
        }
    });

    if errors.is_empty() {
        Ok(result.into_owned())
    } else {
        Err(Error::undefined_var(errors.join(", ")))
    }
}

/// Check if a string contains template variables
pub fn has_templates(s: &str) -> bool {
    TEMPLATE_REGEX.is_match(s)
}

/// Extract all variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    TEMPLATE_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Quote a value as a SQL string literal, doubling embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Convert a JSON value to a string for template substitution
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_simple_substitution() {
        let ctx = TemplateContext::with_vars(json!({
            "s3": {"log_data": "s3://udacity-dend/log_data"}
        }));

        let result = render("FROM {{ s3.log_data }}", &ctx).unwrap();
        assert_eq!(result, "FROM s3://udacity-dend/log_data");
    }

    #[test]
    fn test_repeated_placeholder() {
        let ctx = TemplateContext::with_vars(json!({"t": "users"}));
        let result = render("{{ t }} {{t}}", &ctx).unwrap();
        assert_eq!(result, "users users");
    }

    #[test]
    fn test_undefined_variables_are_all_reported() {
        let ctx = TemplateContext::with_vars(json!({"s3": {}}));
        let err = render("{{ s3.log_data }} {{ iam_role.arn }}", &ctx).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("s3.log_data"));
        assert!(msg.contains("iam_role.arn"));
    }

    #[test]
    fn test_no_templates() {
        let ctx = TemplateContext::new();
        let result = render("DROP TABLE IF EXISTS users", &ctx).unwrap();
        assert_eq!(result, "DROP TABLE IF EXISTS users");
    }

    #[test]
    fn test_render_sql_quotes_strings_only() {
        let ctx = TemplateContext::with_vars(json!({
            "copy": {"max_error": 1000},
            "s3": {"region": "us-west-2"}
        }));

        let result = render_sql("REGION {{ s3.region }} MAXERROR AS {{ copy.max_error }}", &ctx)
            .unwrap();
        assert_eq!(result, "REGION 'us-west-2' MAXERROR AS 1000");
    }

    #[test]
    fn test_render_sql_escapes_embedded_quotes() {
        let ctx = TemplateContext::with_vars(json!({"path": "s3://bucket/o'neil"}));
        let result = render_sql("FROM {{ path }}", &ctx).unwrap();
        assert_eq!(result, "FROM 's3://bucket/o''neil'");
    }

    #[test]
    fn test_has_templates() {
        assert!(has_templates("{{ s3.log_data }}"));
        assert!(has_templates("prefix {{ var }} suffix"));
        assert!(!has_templates("no templates here"));
        assert!(!has_templates("{ not a template }"));
    }

    #[test]
    fn test_extract_variables() {
        let vars = extract_variables("{{ s3.song_data }} and {{ iam_role.arn }}");
        assert_eq!(vars, vec!["s3.song_data", "iam_role.arn"]);
    }

    #[test]
    fn test_whitespace_in_template() {
        let ctx = TemplateContext::with_vars(json!({"key": "value"}));

        assert_eq!(render("{{key}}", &ctx).unwrap(), "value");
        assert_eq!(render("{{ key }}", &ctx).unwrap(), "value");
        assert_eq!(render("{{  key  }}", &ctx).unwrap(), "value");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("auto"), "'auto'");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
