//! Minimal JSON path queries.
//!
//! Supports `$`, `$.field`, `$.field.nested`, `$.array[0]` and the
//! projection `$.array[*].field`, which collects `field` from every element.

use serde_json::Value;

/// Queries `json` at `path`.
///
/// Returns `Ok(None)` when the path is well formed but nothing lives there.
/// A projection over an array yields an array of the values found, possibly
/// empty.
///
/// # Errors
///
/// Returns a message if the path does not start with `$` or has a bad index.
pub fn query(json: &Value, path: &str) -> Result<Option<Value>, String> {
    let path = path.trim();
    let Some(rest) = path.strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let segments = split_path_segments(rest);
    resolve(json, &segments)
}

fn resolve(current: &Value, segments: &[String]) -> Result<Option<Value>, String> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(Some(current.clone()));
    };

    let Some((name, index)) = parse_array_access(segment) else {
        return match current.get(segment.as_str()) {
            Some(next) => resolve(next, rest),
            None => Ok(None),
        };
    };

    let target = if name.is_empty() {
        current
    } else {
        match current.get(name) {
            Some(v) => v,
            None => return Ok(None),
        }
    };

    if index == "*" {
        let Some(items) = target.as_array() else {
            return Ok(None);
        };
        let mut projected = Vec::with_capacity(items.len());
        for item in items {
            if let Some(value) = resolve(item, rest)? {
                projected.push(value);
            }
        }
        return Ok(Some(Value::Array(projected)));
    }

    let idx: usize = index
        .parse()
        .map_err(|_| format!("Invalid array index: {index}"))?;
    match target.get(idx) {
        Some(next) => resolve(next, rest),
        None => Ok(None),
    }
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment[bracket_start + 1..].strip_suffix(']')?;
    Some((&segment[..bracket_start], inner))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pet() -> Value {
        json!({
            "id": 123_456_789,
            "name": "test-dog",
            "category": {"id": 1, "name": "dogs"},
            "photoUrls": ["https://example.com/dog.png"],
            "tags": [{"id": 11, "name": "automation"}]
        })
    }

    #[test]
    fn test_root_returns_document() {
        assert_eq!(query(&pet(), "$").unwrap(), Some(pet()));
    }

    #[test]
    fn test_nested_field() {
        assert_eq!(query(&pet(), "$.category.name").unwrap(), Some(json!("dogs")));
        assert_eq!(query(&pet(), "$.category.missing").unwrap(), None);
    }

    #[test]
    fn test_indexed_element() {
        assert_eq!(query(&pet(), "$.tags[0].id").unwrap(), Some(json!(11)));
        assert_eq!(query(&pet(), "$.tags[3].id").unwrap(), None);
        assert!(query(&pet(), "$.tags[x]").is_err());
    }

    #[test]
    fn test_projection_over_root_array() {
        let list = json!([
            {"id": 1, "name": "a", "status": "sold"},
            {"id": 2, "status": "sold"},
            {"id": 3, "name": "c", "status": "sold"}
        ]);
        assert_eq!(query(&list, "$[*].id").unwrap(), Some(json!([1, 2, 3])));
        assert_eq!(query(&list, "$[*].name").unwrap(), Some(json!(["a", "c"])));
        assert_eq!(query(&list, "$[*]").unwrap(), Some(list.clone()));
    }

    #[test]
    fn test_projection_on_non_array_is_absent() {
        assert_eq!(query(&pet(), "$.name[*]").unwrap(), None);
    }

    #[test]
    fn test_path_must_start_with_dollar() {
        assert!(query(&pet(), "name").is_err());
    }
}
