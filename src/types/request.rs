use std::collections::BTreeMap;

use bon::Builder;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::Result;
use crate::error::Error;

const MAX_TEMPLATE_NAME_CHARS: usize = 64;
const MAX_TEMPLATE_DESCRIPTION_CHARS: usize = 1024;

/// Optional rendering parameters, forwarded to the service as-is.
///
/// Unset fields are left out of the request body so the service applies its own defaults.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Builder)]
#[builder(on(String, into))]
pub struct RenderOptions {
    /// CSS applied to the document.
    pub css: Option<String>,
    /// Google fonts to load, e.g. `Roboto|Open Sans`.
    pub google_fonts: Option<String>,
    /// Crop the image to the element matching this CSS selector.
    pub selector: Option<String>,
    /// Milliseconds to wait before capturing.
    pub ms_delay: Option<u32>,
    /// Pixel ratio, between 1 and 3.
    pub device_scale: Option<f64>,
    /// Wait for `ScreenshotReady()` to be called from the page.
    pub render_when_ready: Option<bool>,
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
}

impl RenderOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.viewport_width.is_some() != self.viewport_height.is_some() {
            return Err(Error::validation(
                "viewport_width and viewport_height must be set together",
            ));
        }
        if let Some(scale) = self.device_scale
            && !(1.0..=3.0).contains(&scale)
        {
            return Err(Error::validation(format!(
                "device_scale must be between 1 and 3, got {scale}"
            )));
        }
        Ok(())
    }
}

/// Body of `POST /v1/image` for rendering an HTML snippet or page.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Builder)]
#[builder(on(String, into))]
pub struct CreateImageRequest {
    pub html: String,
    #[serde(flatten)]
    #[builder(default)]
    pub options: RenderOptions,
}

impl CreateImageRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        self.options.validate()
    }
}

/// Body of `POST /v1/image` for screenshotting a public web page.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Builder)]
#[builder(on(String, into))]
pub struct UrlToImageRequest {
    pub url: String,
    #[serde(flatten)]
    #[builder(default)]
    pub options: RenderOptions,
}

impl UrlToImageRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        self.options.validate()
    }
}

/// Body of `POST /v1/template`.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Builder)]
#[builder(on(String, into))]
pub struct CreateTemplateRequest {
    pub html: String,
    /// Short name, at most 64 characters.
    pub name: Option<String>,
    /// At most 1024 characters.
    pub description: Option<String>,
    #[serde(flatten)]
    #[builder(default)]
    pub options: RenderOptions,
}

impl CreateTemplateRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        check_length("name", self.name.as_deref(), MAX_TEMPLATE_NAME_CHARS)?;
        check_length(
            "description",
            self.description.as_deref(),
            MAX_TEMPLATE_DESCRIPTION_CHARS,
        )?;
        self.options.validate()
    }
}

/// Query parameters of `GET /v1/template`.
///
/// Any other parameter the service understands goes in `filters` and is sent verbatim.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Builder)]
pub struct ListTemplatesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(flatten)]
    #[builder(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListTemplatesRequest {
    /// Adds a verbatim query parameter.
    #[must_use]
    pub fn with_filter<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) if value.chars().count() > max => Err(Error::validation(format!(
            "{field} is limited to {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Kind;

    #[test]
    fn create_image_body_merges_options() {
        let request = CreateImageRequest::builder()
            .html("<div>test</div>")
            .options(
                RenderOptions::builder()
                    .css("body { background-color: orange }")
                    .ms_delay(500)
                    .google_fonts("Roboto")
                    .build(),
            )
            .build();

        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            body,
            json!({
                "html": "<div>test</div>",
                "css": "body { background-color: orange }",
                "ms_delay": 500,
                "google_fonts": "Roboto",
            }),
            "flat body without unset options"
        );
    }

    #[test]
    fn viewport_dimensions_go_together() {
        let request = UrlToImageRequest::builder()
            .url("https://hcti.io")
            .options(RenderOptions::builder().viewport_width(800).build())
            .build();

        let err = request.validate().expect_err("half a viewport");
        assert_eq!(err.kind(), Kind::Validation, "kind");
    }

    #[test]
    fn device_scale_is_bounded() {
        let within = RenderOptions::builder().device_scale(2.0).build();
        let beyond = RenderOptions::builder().device_scale(3.5).build();

        assert!(within.validate().is_ok(), "2.0 is allowed");
        assert!(beyond.validate().is_err(), "3.5 is rejected");
    }

    #[test]
    fn template_name_is_limited() {
        let request = CreateTemplateRequest::builder()
            .html("<p>{{title}}</p>")
            .name("n".repeat(65))
            .build();

        assert!(request.validate().is_err(), "65 characters is too long");
    }

    #[test]
    fn list_templates_query_skips_unset() {
        let query = ListTemplatesRequest::builder().page(2).build();

        let value = serde_json::to_value(&query).expect("serialize");
        assert_eq!(value, json!({ "page": 2 }), "only set params");
    }

    #[test]
    fn list_templates_query_flattens_filters() {
        let query = ListTemplatesRequest::builder()
            .per_page(10)
            .build()
            .with_filter("name", "Title card");

        let value = serde_json::to_value(&query).expect("serialize");
        assert_eq!(
            value,
            json!({ "per_page": 10, "name": "Title card" }),
            "filters sit next to paging params"
        );
    }
}
