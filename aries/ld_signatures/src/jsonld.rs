//! Minimal JSON-LD helpers. Documents are handled as plain JSON; canonical form is JCS.

use serde_json::Value;

use crate::error::{LdSignatureError, LdSignatureResult};

pub const CONTEXT: &str = "@context";

/// Whether the document's `@context` (string or array) contains `context_url`.
pub fn includes_context(document: &Value, context_url: &str) -> bool {
    match document.get(CONTEXT) {
        Some(Value::String(context)) => context == context_url,
        Some(Value::Array(contexts)) => contexts
            .iter()
            .any(|context| context.as_str() == Some(context_url)),
        _ => false,
    }
}

/// Appends `context_url` to the document's `@context`, promoting a single entry to an array.
pub fn add_context(document: &mut Value, context_url: &str) -> LdSignatureResult<()> {
    let object = document.as_object_mut().ok_or_else(|| {
        LdSignatureError::InvalidDocument("document must be a JSON object".to_string())
    })?;
    let url = Value::String(context_url.to_string());
    match object.get_mut(CONTEXT) {
        Some(Value::Array(contexts)) => contexts.push(url),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, url]);
        }
        None => {
            object.insert(CONTEXT.to_string(), Value::Array(vec![url]));
        }
    }
    Ok(())
}

pub fn canonicalize(value: &Value) -> LdSignatureResult<Vec<u8>> {
    serde_json_canonicalizer::to_vec(value)
        .map_err(|err| LdSignatureError::InvalidDocument(format!("canonicalization failed: {err}")))
}

/// Values of a property that may hold either one item or an array of items.
pub fn one_or_many<'a>(document: &'a Value, property: &str) -> Vec<&'a Value> {
    match document.get(property) {
        Some(Value::Array(values)) => values.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(value) => vec![value],
    }
}
