use crate::error::{GeneratorError, GeneratorErrorExt};
use crate::style::{StyleConfig, normalize_style};
use qrgen_derive::api_model;
use serde_json::Value;

#[api_model(deny_unknown_fields = false)]
/// Body accepted by both generation endpoints.
pub struct GenerateBody {
    /// Link or free text to encode
    pub link: String,
    /// Optional styling; missing or invalid values fall back to defaults
    #[serde(default)]
    pub style: Option<StyleConfig>,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Trimmed, non-empty payload.
    pub link: String,
    pub style: StyleConfig,
}

impl GenerateRequest {
    /// Parses a raw request body.
    ///
    /// # Errors
    /// * [`GeneratorError::Json`] when the body is empty or not valid JSON.
    /// * See [`GenerateRequest::from_value`] for the remaining cases.
    pub fn from_slice(body: &[u8]) -> Result<Self, GeneratorError> {
        let value = serde_json::from_slice::<Value>(body).context("Parsing request body")?;
        Self::from_value(value)
    }

    /// Validates an already decoded body. A JSON `null` body counts as an empty object.
    ///
    /// # Errors
    /// * [`GeneratorError::Payload`] when the body is not an object or `link` is present but
    ///   not a string (`null` included).
    /// * [`GeneratorError::EmptyLink`] when `link` is missing or blank.
    pub fn from_value(value: Value) -> Result<Self, GeneratorError> {
        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(GeneratorError::Payload {
                    message: format!("expected a JSON object, got {}", kind(&other)).into(),
                    context: None,
                });
            },
        };

        let style = normalize_style(fields.get("style"));

        let link = match fields.get("link") {
            None => "",
            Some(Value::String(link)) => link.trim(),
            Some(other) => {
                return Err(GeneratorError::Payload {
                    message: format!("link must be a string, got {}", kind(other)).into(),
                    context: None,
                });
            },
        };

        if link.is_empty() {
            return Err(GeneratorError::EmptyLink { context: None });
        }

        Ok(Self { link: link.to_owned(), style })
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
