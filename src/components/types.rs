//! Component data model
//!
//! `Component` is the unit the dispatcher consumes; `ModuleDocument` is the
//! JSON page that carries a list of them. `data` stays an untyped JSON value
//! at the boundary and each renderer checks the fields it needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ContentError, RenderError};

/// A JSON-described unit of renderable content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
    /// Optional wrapper id; when present the output is wrapped in a tagged container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Component {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Link to a neighbouring module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// Previous/next links rendered under a module's content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleNavigation {
    #[serde(default)]
    pub previous: Option<NavLink>,
    #[serde(default)]
    pub next: Option<NavLink>,
}

/// A content page: `{title?, description?, components: [...], navigation?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub components: Vec<Component>,
    #[serde(default)]
    pub navigation: Option<ModuleNavigation>,
}

impl ModuleDocument {
    /// Parse a page document, rejecting anything without a `components` array.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.get("components").is_some_and(Value::is_array) {
            return Err(ContentError::MissingComponents);
        }
        Ok(serde_json::from_value(value)?)
    }
}

// ============================================================================
// Field access helpers
// ============================================================================

/// String field; empty strings count as present.
pub fn get_str<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// Non-empty string field.
pub fn get_text<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    get_str(data, key).filter(|s| !s.is_empty())
}

pub fn get_bool(data: &Value, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

pub fn get_u64(data: &Value, key: &str) -> Option<u64> {
    let value = data.get(key)?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn get_array<'a>(data: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    data.get(key).and_then(Value::as_array)
}

/// Required non-empty string field.
pub fn require_text<'a>(
    data: &'a Value,
    variant: &'static str,
    field: &'static str,
) -> Result<&'a str, RenderError> {
    get_text(data, field).ok_or(RenderError::MissingField { variant, field })
}

/// Required string field that may be empty (rich-text bodies).
pub fn require_str<'a>(
    data: &'a Value,
    variant: &'static str,
    field: &'static str,
) -> Result<&'a str, RenderError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(RenderError::MissingField { variant, field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RenderError::InvalidField {
            variant,
            field,
            expected: "a string",
        }),
    }
}

/// Required array field (may be empty).
pub fn require_array<'a>(
    data: &'a Value,
    variant: &'static str,
    field: &'static str,
) -> Result<&'a Vec<Value>, RenderError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(RenderError::MissingField { variant, field }),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(RenderError::InvalidField {
            variant,
            field,
            expected: "an array",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_deserializes_type_tag() {
        let component: Component = serde_json::from_value(json!({
            "type": "video",
            "data": {"title": "Intro", "videoId": "abc123"},
            "id": "intro-video"
        }))
        .unwrap();

        assert_eq!(component.kind, "video");
        assert_eq!(component.id.as_deref(), Some("intro-video"));
        assert_eq!(get_str(&component.data, "videoId"), Some("abc123"));
    }

    #[test]
    fn test_component_without_data() {
        let component: Component = serde_json::from_str(r#"{"type": "unknown_widget"}"#).unwrap();
        assert!(component.data.is_null());
        assert!(component.id.is_none());
    }

    #[test]
    fn test_module_document_requires_components() {
        let err = ModuleDocument::from_json(r#"{"title": "Modul 1"}"#).unwrap_err();
        assert!(matches!(err, ContentError::MissingComponents));

        let err = ModuleDocument::from_json(r#"{"components": {}}"#).unwrap_err();
        assert!(matches!(err, ContentError::MissingComponents));

        let doc = ModuleDocument::from_json(
            r#"{"title": "Modul 1", "components": [{"type": "info", "data": {}}],
                "navigation": {"next": {"title": "Modul 2", "url": "/pages/modul2.html"}}}"#,
        )
        .unwrap();
        assert_eq!(doc.components.len(), 1);
        assert_eq!(
            doc.navigation.unwrap().next.unwrap().url,
            "/pages/modul2.html"
        );
    }

    #[test]
    fn test_require_helpers() {
        let data = json!({"title": "", "rows": "nope", "headers": []});
        assert_eq!(
            require_text(&data, "table", "title"),
            Err(RenderError::MissingField { variant: "table", field: "title" })
        );
        assert!(require_array(&data, "table", "headers").unwrap().is_empty());
        assert!(matches!(
            require_array(&data, "table", "rows"),
            Err(RenderError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_get_u64_accepts_strings_and_floats() {
        let data = json!({"a": 3, "b": "2", "c": 2.0, "d": -1});
        assert_eq!(get_u64(&data, "a"), Some(3));
        assert_eq!(get_u64(&data, "b"), Some(2));
        assert_eq!(get_u64(&data, "c"), Some(2));
        assert_eq!(get_u64(&data, "d"), None);
    }
}
