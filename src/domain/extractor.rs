//! Config-driven floor extraction from arbitrary stats documents

use serde_json::Value;
use crate::shared::errors::ExtractionError;

/// Walk `document` along `path` and return the first numeric leaf scaled by `multiplier`.
///
/// Each key is looked up in the current object. A number ends the walk right away,
/// even when keys remain, so `["stats"]` is enough for `{"stats": 12}`. An object is
/// descended into. Anything else (missing key, string, array, null, bool) is an error.
pub fn extract_floor(
    document: &Value,
    path: &[String],
    multiplier: f64,
) -> Result<f64, ExtractionError> {
    let mut node = document;

    for key in path {
        match node.get(key.as_str()) {
            Some(Value::Number(number)) => {
                let value = number
                    .as_f64()
                    .ok_or_else(|| ExtractionError::UnexpectedValue {
                        key: key.clone(),
                        found: number.to_string(),
                    })?;
                return Ok(value * multiplier);
            }
            Some(child @ Value::Object(_)) => node = child,
            other => {
                return Err(ExtractionError::UnexpectedValue {
                    key: key.clone(),
                    found: other.map_or_else(|| "<missing>".to_string(), Value::to_string),
                })
            }
        }
    }

    Err(ExtractionError::FloorNotFound)
}
