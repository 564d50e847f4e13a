//! Client for the [HTML/CSS to Image](https://htmlcsstoimage.com) API.
//!
//! ```rust,no_run
//! use htmlcsstoimage::Client;
//! use htmlcsstoimage::types::{CreateImageRequest, TemplateValues};
//!
//! # async fn run() -> htmlcsstoimage::Result<()> {
//! let client = Client::from_env()?;
//!
//! let image = client
//!     .create_image(&CreateImageRequest::builder().html("<div>Hello</div>").build())
//!     .await?;
//! println!("{}", image.url);
//!
//! // No network call: the URL is signed locally with the API key.
//! let values = TemplateValues::from([("title", "Flexbox for life!")]);
//! let signed = client.create_image_from_template("t-123", &values)?;
//! println!("{signed}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod signing;
pub mod types;

use std::result::Result as StdResult;

use reqwest::{Client as ReqwestClient, Request, Response};
use serde::de::DeserializeOwned;

pub use client::Client;
pub use config::Config;
pub use error::Error;

pub type Result<T> = StdResult<T, Error>;

/// Public API host.
pub const DEFAULT_HOST: &str = "https://hcti.io";

/// Sends `request` and decodes a successful JSON body into `T`.
pub(crate) async fn request<T: DeserializeOwned>(
    client: &ReqwestClient,
    request: Request,
) -> Result<T> {
    let response = send(client, request).await?;
    let bytes = response.bytes().await?;

    deserialize(&bytes)
}

/// Sends `request`, turning any non-success status into [`error::Status`].
pub(crate) async fn send(client: &ReqwestClient, request: Request) -> Result<Response> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    #[cfg(feature = "tracing")]
    tracing::debug!(method = %method, path = %path, "sending request");

    let response = client.execute(request).await?;
    let status_code = response.status();

    if !status_code.is_success() {
        let message = status_message(response.text().await);

        #[cfg(feature = "tracing")]
        tracing::error!(
            status = %status_code,
            method = %method,
            path = %path,
            message = %message,
            "request failed"
        );

        return Err(Error::status(status_code, method, path, message));
    }

    Ok(response)
}

/// Body of a failed response, or a note saying why it could not be read.
fn status_message(body: StdResult<String, reqwest::Error>) -> String {
    body.unwrap_or_else(|e| {
        #[cfg(feature = "tracing")]
        tracing::warn!(error = %e, "failed to read error response body");

        format!("<failed to read response body: {e}>")
    })
}

#[cfg(not(feature = "tracing"))]
fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(feature = "tracing")]
fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let mut on_ignored = |path: serde_ignored::Path<'_>| {
        tracing::debug!(%path, "ignored response field");
    };
    let ignored = serde_ignored::Deserializer::new(&mut de, &mut on_ignored);
    let value = serde_path_to_error::deserialize(ignored)?;
    de.end()?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Page {
        items: Vec<Item>,
    }

    #[derive(Debug, Deserialize)]
    struct Item {
        #[expect(dead_code, reason = "only decoded")]
        id: u32,
    }

    #[test]
    fn unreadable_body_is_reported_in_message() {
        let err = ReqwestClient::new()
            .get("http://[")
            .build()
            .expect_err("malformed url");

        let message = status_message(Err(err));
        assert!(
            message.starts_with("<failed to read response body:"),
            "message: {message}"
        );
    }

    #[test]
    fn readable_body_is_kept() {
        let message = status_message(Ok(r#"{"error":"Bad Request"}"#.to_owned()));

        assert_eq!(message, r#"{"error":"Bad Request"}"#, "raw body");
    }

    #[test]
    fn decode_error_is_internal() {
        let err = deserialize::<Page>(br#"{"items":[{"id":"x"}]}"#).expect_err("wrong type");

        assert_eq!(err.kind(), error::Kind::Internal, "kind");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn decode_error_names_field_path() {
        let err = deserialize::<Page>(br#"{"items":[{"id":1},{"id":"x"}]}"#)
            .expect_err("wrong type");

        assert!(err.to_string().contains("items[1].id"), "path in: {err}");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn unknown_fields_are_skipped() {
        let page = deserialize::<Page>(br#"{"items":[],"pagination":{"next":null}}"#)
            .expect("unknown fields only logged");

        assert!(page.items.is_empty(), "no items");
    }
}
