//! Template engine for release-notes slots.
//!
//! Templates are plain strings with `{{variable}}` placeholders. Two section
//! forms allow a slot to pick between alternatives without code:
//!
//! - `{{#name}}...{{/name}}` renders its body when `name` is set and non-empty
//! - `{{^name}}...{{/name}}` renders its body when `name` is missing or empty
//!
//! ## Example
//!
//! ```rust
//! use relnote_core::template::{TemplateVariables, process_template};
//!
//! let vars = TemplateVariables::new()
//!     .set("message", "fix crash")
//!     .set("name", "Alice B");
//!
//! let template = "{{message}} - {{#author}}@{{author}}{{/author}}{{^author}}{{name}}{{/author}}";
//! assert_eq!(process_template(template, &vars), "fix crash - Alice B");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Regex matching a single `{{...}}` tag, with an optional section sigil
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(?P<sigil>[#^/]?)\s*(?P<name>[A-Za-z_][A-Za-z0-9_.]*)\s*\}\}")
        .expect("Invalid regex")
});

/// Variables available to a template while it renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    values: HashMap<String, String>,
}

impl TemplateVariables {
    /// Creates an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable and returns self for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets a variable only when a value is present.
    pub fn set_opt(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.values.insert(key.into(), value.into());
        }
        self
    }

    /// Gets the value for a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Checks if a variable exists (has a value).
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// A callable template slot.
pub type TemplateFn = Arc<dyn Fn(&TemplateVariables) -> String + Send + Sync>;

/// A template slot: either an interpolation string or a callable.
///
/// Only the text form can be read from or written to a configuration file.
#[derive(Clone)]
pub enum Template {
    /// Interpolation string using `{{name}}` placeholders
    Text(String),
    /// Function mapping the slot's variables to output
    Function(TemplateFn),
}

impl Template {
    /// Create a text template
    pub fn text(template: impl Into<String>) -> Self {
        Self::Text(template.into())
    }

    /// Create a callable template
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&TemplateVariables) -> String + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Render the slot with the given variables
    pub fn render(&self, vars: &TemplateVariables) -> String {
        match self {
            Self::Text(template) => process_template(template, vars),
            Self::Function(f) => f(vars),
        }
    }

    /// The template source, when this is a text template
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(template) => Some(template),
            Self::Function(_) => None,
        }
    }

    /// Variable names used by a text template that are not in `known`
    pub fn unknown_variables(&self, known: &[&str]) -> Vec<String> {
        match self {
            Self::Text(template) => extract_variable_names(template)
                .into_iter()
                .filter(|name| !known.contains(&name.as_str()))
                .collect(),
            Self::Function(_) => Vec::new(),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(template) => f.debug_tuple("Text").field(template).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Template {
    fn from(template: &str) -> Self {
        Self::Text(template.to_string())
    }
}

impl From<String> for Template {
    fn from(template: String) -> Self {
        Self::Text(template)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(template) => serializer.serialize_str(template),
            Self::Function(_) => Err(serde::ser::Error::custom(
                "function templates cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Text)
    }
}

#[derive(Debug)]
enum Node {
    Text(String),
    Variable {
        name: String,
        raw: String,
    },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

struct Frame {
    name: String,
    inverted: bool,
    raw: String,
    children: Vec<Node>,
}

fn push_node(stack: &mut [Frame], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(frame) => frame.children.push(node),
        None => root.push(node),
    }
}

/// Parse a template into nodes. Unmatched tags are kept as literal text.
fn parse(template: &str) -> Vec<Node> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut last = 0;

    for caps in TAG_REGEX.captures_iter(template) {
        let Some(tag) = caps.get(0) else { continue };
        if tag.start() > last {
            let text = template[last..tag.start()].to_string();
            push_node(&mut stack, &mut root, Node::Text(text));
        }
        last = tag.end();

        let raw = tag.as_str().to_string();
        let name = caps["name"].to_string();
        match &caps["sigil"] {
            sigil @ ("#" | "^") => stack.push(Frame {
                name,
                inverted: sigil == "^",
                raw,
                children: Vec::new(),
            }),
            "/" => match stack.pop() {
                Some(frame) if frame.name == name => {
                    let section = Node::Section {
                        name: frame.name,
                        inverted: frame.inverted,
                        children: frame.children,
                    };
                    push_node(&mut stack, &mut root, section);
                }
                Some(frame) => {
                    stack.push(frame);
                    push_node(&mut stack, &mut root, Node::Text(raw));
                }
                None => push_node(&mut stack, &mut root, Node::Text(raw)),
            },
            _ => push_node(&mut stack, &mut root, Node::Variable { name, raw }),
        }
    }

    if last < template.len() {
        let text = template[last..].to_string();
        push_node(&mut stack, &mut root, Node::Text(text));
    }

    // Unclosed sections fall back to literal text
    while let Some(frame) = stack.pop() {
        push_node(&mut stack, &mut root, Node::Text(frame.raw));
        for child in frame.children {
            push_node(&mut stack, &mut root, child);
        }
    }

    root
}

fn render_nodes(nodes: &[Node], vars: &TemplateVariables, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { name, raw } => out.push_str(vars.get(name).unwrap_or(raw)),
            Node::Section {
                name,
                inverted,
                children,
            } => {
                let present = vars.get(name).is_some_and(|v| !v.is_empty());
                if present != *inverted {
                    render_nodes(children, vars, out);
                }
            }
        }
    }
}

/// Process a template string, replacing `{{variable}}` patterns with values.
///
/// Variables that are not defined are left unchanged in the output.
pub fn process_template(template: &str, vars: &TemplateVariables) -> String {
    let nodes = parse(template);
    let mut out = String::with_capacity(template.len());
    render_nodes(&nodes, vars, &mut out);
    out
}

/// Extract the unique variable names referenced by a template, including
/// section names, in order of first use.
pub fn extract_variable_names(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in TAG_REGEX.captures_iter(template) {
        if &caps["sigil"] == "/" {
            continue;
        }
        let name = caps["name"].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMIT: &str =
        "- [{{message}}]({{url}}) - {{#author}}@{{author}}{{/author}}{{^author}}{{name}}{{/author}}";

    #[test]
    fn test_process_template_basic() {
        let vars = TemplateVariables::new()
            .set("heading", "Bug Fixes");

        assert_eq!(
            process_template("\n### {{heading}}\n", &vars),
            "\n### Bug Fixes\n"
        );
    }

    #[test]
    fn test_process_template_missing_var() {
        let vars = TemplateVariables::new().set("release", "v1.0.0");

        let result = process_template("{{release}} - {{missing}}", &vars);
        assert_eq!(result, "v1.0.0 - {{missing}}");
    }

    #[test]
    fn test_section_with_author() {
        let vars = TemplateVariables::new()
            .set("message", "fix crash")
            .set("url", "https://x/1")
            .set("author", "alice")
            .set("name", "Alice B");

        assert_eq!(
            process_template(COMMIT, &vars),
            "- [fix crash](https://x/1) - @alice"
        );
    }

    #[test]
    fn test_inverted_section_without_author() {
        let vars = TemplateVariables::new()
            .set("message", "fix crash")
            .set("url", "https://x/1")
            .set("name", "Alice B");

        assert_eq!(
            process_template(COMMIT, &vars),
            "- [fix crash](https://x/1) - Alice B"
        );
    }

    #[test]
    fn test_empty_value_is_falsy() {
        let vars = TemplateVariables::new().set("author", "").set("name", "Bob");
        assert_eq!(
            process_template("{{#author}}@{{author}}{{/author}}{{^author}}{{name}}{{/author}}", &vars),
            "Bob"
        );
    }

    #[test]
    fn test_unclosed_section_is_literal() {
        let vars = TemplateVariables::new().set("a", "x");
        assert_eq!(process_template("{{#a}}value {{a}}", &vars), "{{#a}}value x");
        assert_eq!(process_template("{{/a}} tail", &vars), "{{/a}} tail");
    }

    #[test]
    fn test_spaces_inside_tags() {
        let vars = TemplateVariables::new().set("name", "relnote");
        assert_eq!(process_template("{{ name }}", &vars), "relnote");
    }

    #[test]
    fn test_extract_variable_names() {
        let names = extract_variable_names(COMMIT);
        assert_eq!(names, vec!["message", "url", "author", "name"]);
    }

    #[test]
    fn test_function_template() {
        let template = Template::function(|vars| {
            format!("* {}", vars.get("message").unwrap_or_default())
        });
        let vars = TemplateVariables::new().set("message", "add flag");

        assert_eq!(template.render(&vars), "* add flag");
        assert!(template.as_text().is_none());
    }

    #[test]
    fn test_function_template_does_not_serialize() {
        let template = Template::function(|_| String::new());
        assert!(serde_json::to_string(&template).is_err());
    }

    #[test]
    fn test_text_template_serde() {
        let template: Template = serde_json::from_str("\"## {{release}}\"").unwrap();
        assert_eq!(template, Template::text("## {{release}}"));
        assert_eq!(
            serde_json::to_string(&template).unwrap(),
            "\"## {{release}}\""
        );
    }

    #[test]
    fn test_non_string_template_rejected() {
        assert!(serde_json::from_str::<Template>("42").is_err());
    }

    #[test]
    fn test_unknown_variables() {
        let template = Template::text("{{heading}} {{title}}");
        assert_eq!(template.unknown_variables(&["heading"]), vec!["title"]);
    }
}
