use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Result of `POST /v1/image`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CreatedImage {
    /// Public URL of the rendered image.
    pub url: String,
    pub id: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `GET /v1/template`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TemplateList {
    pub data: Vec<Template>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Template {
    pub id: String,
    pub html: String,
    #[serde(default)]
    pub css: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub google_fonts: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Result of `POST /v1/template`.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CreatedTemplate {
    pub template_id: String,
    #[serde(default)]
    pub template_version: Option<i64>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// An offline-generated, HMAC-signed template image URL.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignedUrl {
    pub url: String,
}

impl SignedUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl From<SignedUrl> for String {
    fn from(signed: SignedUrl) -> Self {
        signed.url
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn template_list_keeps_unknown_fields() {
        let list: TemplateList = serde_json::from_value(json!({
            "data": [{
                "id": "t-123",
                "html": "<div>{{title}}</div>",
                "css": "div { color: red }",
                "version": 1_563_906_627,
            }],
            "pagination": { "next_page_start": null },
        }))
        .expect("decode");

        assert_eq!(list.data.len(), 1, "one template");
        let template = &list.data[0];
        assert_eq!(template.id, "t-123", "id");
        assert_eq!(template.css.as_deref(), Some("div { color: red }"), "css");
        assert!(template.name.is_none(), "name absent");
        assert!(template.extra.contains_key("version"), "extra field kept");
        assert!(list.extra.contains_key("pagination"), "pagination kept");
    }

    #[test]
    fn created_template_version_is_optional() {
        let created: CreatedTemplate =
            serde_json::from_value(json!({ "template_id": "t-1" })).expect("decode");

        assert_eq!(created.template_id, "t-1", "id");
        assert_eq!(created.template_version, None, "no version");
    }
}
