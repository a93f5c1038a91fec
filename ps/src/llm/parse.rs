//! Extract item-name lists from model replies
//!
//! Models are asked for a bare JSON array of strings but often wrap it in a
//! code fence, prose, or an object like `{"packingList": [...]}`.

use serde_json::Value;

use super::LlmError;

/// Parse a model reply into a list of item names
///
/// Entries are trimmed and blank entries dropped. An empty array is a valid
/// answer and yields an empty list.
pub fn parse_string_list(text: &str) -> Result<Vec<String>, LlmError> {
    let body = strip_code_fence(text.trim());

    let value = match serde_json::from_str::<Value>(body) {
        Ok(v) => v,
        Err(_) => {
            let start = body.find('[');
            let end = body.rfind(']');
            match (start, end) {
                (Some(s), Some(e)) if s < e => serde_json::from_str::<Value>(&body[s..=e])
                    .map_err(|err| LlmError::NotAList(format!("Malformed item array: {}", err)))?,
                _ => {
                    return Err(LlmError::NotAList(format!(
                        "Expected a JSON array of item names, got: {}",
                        preview(body)
                    )));
                }
            }
        }
    };

    let array = match value {
        Value::Array(items) => items,
        Value::Object(fields) => array_field(fields)?,
        other => {
            return Err(LlmError::NotAList(format!(
                "Expected a JSON array of item names, got: {}",
                preview(&other.to_string())
            )));
        }
    };

    let mut names = Vec::with_capacity(array.len());
    for entry in array {
        match entry {
            Value::String(s) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    names.push(trimmed.to_string());
                }
            }
            other => {
                return Err(LlmError::NotAList(format!(
                    "Item list contained a non-string entry: {}",
                    other
                )));
            }
        }
    }
    Ok(names)
}

/// Wrapper keys models use for the item list, most specific first
const LIST_KEYS: [&str; 3] = ["packingList", "suggestedItems", "items"];

/// Pick the item array out of a wrapper object
///
/// A known key wins. Otherwise the object must hold exactly one array, so a
/// reply that also echoes the packed items cannot be mistaken for the list.
fn array_field(mut fields: serde_json::Map<String, Value>) -> Result<Vec<Value>, LlmError> {
    for key in LIST_KEYS {
        if let Some(Value::Array(items)) = fields.remove(key) {
            return Ok(items);
        }
    }

    let mut arrays: Vec<(String, Vec<Value>)> = fields
        .into_iter()
        .filter_map(|(key, v)| match v {
            Value::Array(items) => Some((key, items)),
            _ => None,
        })
        .collect();
    match arrays.len() {
        0 => Err(LlmError::NotAList("JSON object contained no item array".to_string())),
        1 => Ok(arrays.remove(0).1),
        _ => {
            let keys: Vec<String> = arrays.into_iter().map(|(key, _)| key).collect();
            Err(LlmError::NotAList(format!(
                "JSON object has several arrays and none is a known list key: {}",
                keys.join(", ")
            )))
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language tag line, e.g. ```json
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn preview(text: &str) -> String {
    const MAX: usize = 80;
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
