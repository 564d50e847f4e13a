//! Offline signed URLs for template images.
//!
//! A signed URL carries the template variables as query parameters plus an HMAC-SHA256 token
//! over them, keyed with the account API key. The service recomputes the token and refuses the
//! request if any parameter was altered, so URLs can be handed out without exposing the key.
//!
//! The token is computed over the *decoded* query string while the URL embeds the *encoded*
//! one. Encoding must still match the service byte for byte: RFC 3986 unreserved characters
//! pass through, everything else becomes `%XX` with uppercase hex (space is `%20`, never `+`).

use std::borrow::Cow;

use hmac::{Hmac, Mac as _};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use secrecy::{ExposeSecret as _, SecretString};
use sha2::Sha256;

use crate::Result;
use crate::error::{Error, Kind};
use crate::types::{SignedUrl, TemplateValues};

/// Base of every signed template URL.
pub const SIGNED_URL_BASE: &str = "https://hcti.io/v1/image";

/// Everything except `A-Z a-z 0-9 - . _ ~`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

type HmacSha256 = Hmac<Sha256>;

/// Builds the signed URL for `template_id` with `values` substituted.
///
/// Deterministic and offline. Fails only for an empty `api_key`.
pub fn sign_template_url(
    api_key: &SecretString,
    template_id: &str,
    values: &TemplateValues,
) -> Result<SignedUrl> {
    let key = api_key.expose_secret();
    if key.is_empty() {
        return Err(Error::validation(
            "an API key is required to sign template URLs",
        ));
    }

    let query = encode_query(values);
    let payload = signing_payload(&query)?;
    let token = hmac_hex(key.as_bytes(), payload.as_bytes())?;

    let mut url = format!("{SIGNED_URL_BASE}/{}/{token}", encode_component(template_id));
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(template_id, params = values.len(), "signed template url");

    Ok(SignedUrl { url })
}

/// `&`-joined `name=value` pairs in insertion order, percent-encoded.
#[must_use]
pub fn encode_query(values: &TemplateValues) -> String {
    values
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_component(name),
                encode_component(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes an encoded query back into the string the token is computed over.
///
/// `+` decodes to a space as in form decoding.
pub fn signing_payload(encoded_query: &str) -> Result<String> {
    let spaced = encoded_query.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| Error::with_source(Kind::Validation, e))
}

pub(crate) fn encode_component(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT).into()
}

fn hmac_hex(key: &[u8], payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| Error::validation(format!("invalid HMAC key: {e}")))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
