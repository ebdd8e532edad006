use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// `name[3]` or `name[]`
static INDEXED_SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)\[(\d*)\]$").unwrap()
});

/// Resolve a dotted, bracket-indexed key path against a record
///
/// Returns `None` when any segment is missing or traversal hits a value that
/// cannot be indexed. `name[]` resolves to the first element of `name`.
///
/// ```rust
/// use layermap::resolve_path;
/// use serde_json::json;
///
/// let record = json!({"a": {"b": [10, 20]}});
/// assert_eq!(resolve_path(&record, "a.b[1]"), Some(&json!(20)));
/// assert_eq!(resolve_path(&record, "a.c"), None);
/// ```
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| resolve_segment(current, segment))
}

fn resolve_segment<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    if current.is_null() {
        return None;
    }

    if let Some(caps) = INDEXED_SEGMENT_REGEX.captures(segment) {
        let items = current.get(&caps[1])?.as_array()?;
        let index = match &caps[2] {
            "" => 0,
            digits => digits.parse::<usize>().ok()?,
        };
        return items.get(index);
    }

    match current {
        Value::Object(obj) => obj.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_lookup() {
        let record = json!({"a": {"b": 5}});

        assert_eq!(resolve_path(&record, "a.b"), Some(&json!(5)));
        assert_eq!(resolve_path(&record, "a.c"), None);
        assert_eq!(resolve_path(&record, "a"), Some(&json!({"b": 5})));
    }

    #[test]
    fn test_indexed_lookup() {
        let record = json!({"a": [1, 2, 3]});

        assert_eq!(resolve_path(&record, "a[1]"), Some(&json!(2)));
        assert_eq!(resolve_path(&record, "a[]"), Some(&json!(1)));
        assert_eq!(resolve_path(&record, "a[9]"), None);
    }

    #[test]
    fn test_index_on_non_array_is_absent() {
        let record = json!({"a": {"b": 1}, "s": "text"});

        assert_eq!(resolve_path(&record, "a[0]"), None);
        assert_eq!(resolve_path(&record, "s[]"), None);
        assert_eq!(resolve_path(&record, "missing[0]"), None);
    }

    #[test]
    fn test_nested_array_of_objects() {
        let record = json!({
            "posts": [
                {"title": "First", "author": {"name": "Ann"}},
                {"title": "Second", "author": {"name": "Ben"}}
            ]
        });

        assert_eq!(resolve_path(&record, "posts[1].title"), Some(&json!("Second")));
        assert_eq!(resolve_path(&record, "posts[].author.name"), Some(&json!("Ann")));
    }

    #[test]
    fn test_null_short_circuits() {
        let record = json!({"a": null});

        assert_eq!(resolve_path(&record, "a"), Some(&Value::Null));
        assert_eq!(resolve_path(&record, "a.b"), None);
        assert_eq!(resolve_path(&Value::Null, "a"), None);
    }

    #[test]
    fn test_numeric_segment_indexes_array() {
        let record = json!({"matrix": [[1, 2], [3, 4]]});

        assert_eq!(resolve_path(&record, "matrix.1"), Some(&json!([3, 4])));
        assert_eq!(resolve_path(&record, "matrix[0].1"), Some(&json!(2)));
    }

    #[test]
    fn test_scalar_traversal_is_absent() {
        let record = json!({"n": 42});
        assert_eq!(resolve_path(&record, "n.value"), None);
    }
}
