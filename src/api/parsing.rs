use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::collections::HashMap;

use crate::core::models::InteractionPayload;
use crate::errors::SlackError;

/// Decode one `application/x-www-form-urlencoded` component.
///
/// `+` is a space; `%2B` is a literal plus.
///
/// # Errors
///
/// Returns an error if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use donutbot::api::parsing::decode_url_component;
///
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("1%2B1").unwrap(), "1+1");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, SlackError> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| SlackError::ParseError(format!("Failed to decode URL component: {e}")))
}

/// Parse a form body into key/value pairs. Later duplicates win.
///
/// # Errors
///
/// Returns an error if any key or value is not valid UTF-8 once decoded.
pub fn parse_form(body: &str) -> Result<HashMap<String, String>, SlackError> {
    let mut form = HashMap::new();
    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        form.insert(decode_url_component(key)?, decode_url_component(value)?);
    }
    Ok(form)
}

/// Decode the `payload` form field of an interactive request.
///
/// # Errors
///
/// Returns an error if the field is missing or is not a valid payload.
pub fn parse_interactive_payload(form_body: &str) -> Result<InteractionPayload, SlackError> {
    let form = parse_form(form_body)?;
    let raw = form
        .get("payload")
        .ok_or_else(|| SlackError::ParseError("Missing payload field".to_string()))?;
    serde_json::from_str(raw)
        .map_err(|e| SlackError::ParseError(format!("Invalid JSON payload: {e}")))
}

/// Extract the request body, decoding base64 when the front door flagged it.
///
/// # Errors
///
/// Returns an error if the body is absent, not a string, or not valid base64
/// UTF-8.
pub fn request_body(request: &Value) -> Result<String, SlackError> {
    let body = request
        .get("body")
        .and_then(Value::as_str)
        .ok_or_else(|| SlackError::ParseError("Missing body".to_string()))?;

    let encoded = request
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| SlackError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SlackError::ParseError(format!("Body is not UTF-8: {e}")))
}

/// Request path from a function URL (`rawPath`) or REST API (`path`) event.
#[must_use]
pub fn request_path(request: &Value) -> &str {
    v_str(request, &["rawPath"])
        .or_else(|| v_str(request, &["path"]))
        .unwrap_or("")
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}
