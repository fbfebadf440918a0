//! Configuration objects for the presentation components.
//!
//! Nothing here renders anything. Each function takes the properties an MDX
//! provider hands to an element override and produces the configuration object
//! the external component receives: a resolved language, a fixed style or
//! theme, and every other property forwarded untouched.
//!
//! Property precedence follows the order in which the properties are spread
//! onto the component:
//!
//! - [`code`]: computed `language` and `style` first, forwarded properties
//!   after, so a forwarded `language` or `style` replaces the computed one.
//! - [`step_through`]: forwarded properties first, the fixed `theme` and the
//!   children after, so those two always win.

use crate::language::resolve_language;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Style given to the syntax highlighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightStyle {
    #[default]
    Darcula,
}

impl HighlightStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darcula => "darcula",
        }
    }
}

/// Theme given to the step-through code presenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurferTheme {
    #[default]
    NightOwl,
}

impl SurferTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NightOwl => "night-owl",
        }
    }
}

/// Properties delivered to an element override by the Markdown parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementProps {
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default)]
    pub children: String,

    /// Anything else, forwarded in insertion order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ElementProps {
    pub fn new(children: impl Into<String>) -> Self {
        Self {
            children: children.into(),
            ..Self::default()
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        if let Some(class_name) = &self.class_name {
            map.insert("className".to_string(), Value::String(class_name.clone()));
        }
        map.insert("children".to_string(), Value::String(self.children.clone()));
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
    }
}

/// Configuration handed to the syntax highlighter.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightProps {
    pub language: String,
    pub style: HighlightStyle,
    pub props: ElementProps,
}

impl HighlightProps {
    /// Flattened property object, with later properties replacing earlier ones.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("language".to_string(), Value::String(self.language.clone()));
        map.insert("style".to_string(), Value::String(self.style.as_str().to_string()));
        self.props.write_into(&mut map);
        map
    }

    /// The language the highlighter ends up with after property spreading.
    pub fn effective_language(&self) -> &str {
        match self.props.extra.get("language") {
            Some(Value::String(language)) => language,
            _ => &self.language,
        }
    }
}

impl Serialize for HighlightProps {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}

/// Configuration handed to the step-through presenter.
#[derive(Debug, Clone, PartialEq)]
pub struct SurferConfig {
    pub theme: SurferTheme,
    pub props: ElementProps,
}

impl SurferConfig {
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(class_name) = &self.props.class_name {
            map.insert("className".to_string(), Value::String(class_name.clone()));
        }
        for (key, value) in &self.props.extra {
            map.insert(key.clone(), value.clone());
        }
        map.insert("theme".to_string(), Value::String(self.theme.as_str().to_string()));
        map.insert("children".to_string(), Value::String(self.props.children.clone()));
        map
    }
}

impl Serialize for SurferConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}

/// `code` element override: resolve the language and attach the fixed style.
pub fn code(props: ElementProps) -> HighlightProps {
    let language = resolve_language(props.class_name.as_deref());
    HighlightProps {
        language,
        style: HighlightStyle::Darcula,
        props,
    }
}

/// `pre` element override: render the children directly.
pub fn pre(props: ElementProps) -> String {
    props.children
}

/// Wrap step-through content with the fixed presenter theme.
pub fn step_through(props: ElementProps) -> SurferConfig {
    SurferConfig {
        theme: SurferTheme::NightOwl,
        props,
    }
}

/// Output of an element override.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Highlight(HighlightProps),
    Passthrough(String),
}

/// Element overrides exported to an MDX provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentMap;

impl ComponentMap {
    pub const ELEMENTS: &'static [&'static str] = &["pre", "code"];

    pub fn new() -> Self {
        Self
    }

    pub fn handles(&self, element: &str) -> bool {
        Self::ELEMENTS.contains(&element)
    }

    /// Apply the override registered for `element`, if any.
    pub fn render(&self, element: &str, props: ElementProps) -> Option<Rendered> {
        match element {
            "pre" => Some(Rendered::Passthrough(pre(props))),
            "code" => Some(Rendered::Highlight(code(props))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_code_resolves_language_and_style() {
        let highlighted = code(ElementProps::new("fn main() {}").with_class_name("language-rust"));

        assert_eq!(highlighted.language, "rust");
        assert_eq!(highlighted.style, HighlightStyle::Darcula);
        assert_eq!(highlighted.props.children, "fn main() {}");
    }

    #[test]
    fn test_code_without_class_name_defaults() {
        let highlighted = code(ElementProps::new("console.log(1)"));
        assert_eq!(highlighted.language, "javascript");
        assert_eq!(highlighted.effective_language(), "javascript");
    }

    #[test]
    fn test_code_forwards_props_in_order() {
        let highlighted = code(
            ElementProps::new("x = 1")
                .with_class_name("language-python")
                .with_prop("showLineNumbers", true)
                .with_prop("metastring", "title=a.py"),
        );

        let value = serde_json::to_value(&highlighted).unwrap();
        assert_eq!(
            value,
            json!({
                "language": "python",
                "style": "darcula",
                "className": "language-python",
                "children": "x = 1",
                "showLineNumbers": true,
                "metastring": "title=a.py",
            })
        );

        let keys: Vec<_> = highlighted.to_json_map().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["language", "style", "className", "children", "showLineNumbers", "metastring"]
        );
    }

    #[test]
    fn test_forwarded_language_overrides_computed() {
        let highlighted = code(
            ElementProps::new("SELECT 1")
                .with_class_name("language-python")
                .with_prop("language", "sql"),
        );

        assert_eq!(highlighted.language, "python");
        assert_eq!(highlighted.effective_language(), "sql");
        assert_eq!(highlighted.to_json_map()["language"], json!("sql"));
    }

    #[test]
    fn test_non_string_language_prop_is_ignored_for_effective_language() {
        let highlighted = code(ElementProps::new("").with_prop("language", 3));
        assert_eq!(highlighted.effective_language(), "javascript");
    }

    #[test]
    fn test_pre_passes_children_through() {
        assert_eq!(pre(ElementProps::new("<code/>").with_prop("id", "x")), "<code/>");
    }

    #[test]
    fn test_step_through_theme_wins() {
        let config = step_through(
            ElementProps::new("step one")
                .with_prop("theme", "solarized")
                .with_prop("children", "ignored")
                .with_prop("showNumbers", true),
        );

        let map = config.to_json_map();
        assert_eq!(map["theme"], json!("night-owl"));
        assert_eq!(map["children"], json!("step one"));
        assert_eq!(map["showNumbers"], json!(true));
    }

    #[test]
    fn test_component_map_dispatch() {
        let components = ComponentMap::new();
        let props = ElementProps::new("puts 1").with_class_name("language-ruby");

        assert!(components.handles("code"));
        assert!(components.handles("pre"));
        assert!(!components.handles("table"));

        match components.render("code", props.clone()) {
            Some(Rendered::Highlight(highlighted)) => assert_eq!(highlighted.language, "ruby"),
            other => panic!("unexpected render result: {other:?}"),
        }
        assert_eq!(
            components.render("pre", props.clone()),
            Some(Rendered::Passthrough("puts 1".to_string()))
        );
        assert_eq!(components.render("table", props), None);
    }

    #[test]
    fn test_element_props_deserialize_from_mdx_shape() {
        let props: ElementProps = serde_json::from_value(json!({
            "className": "language-go",
            "children": "package main",
            "title": "main.go",
        }))
        .unwrap();

        assert_eq!(props.class_name.as_deref(), Some("language-go"));
        assert_eq!(props.children, "package main");
        assert_eq!(props.extra.get("title"), Some(&json!("main.go")));
        assert_eq!(code(props).language, "go");
    }
}
