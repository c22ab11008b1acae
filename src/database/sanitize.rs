use serde_json::{Map, Value};

/// Fields that can only be set by the server, never by API input. `owner` and
/// `owner_id` are stamped at creation from the authenticated requester and are
/// immutable afterwards, so any client-supplied value is dropped before the
/// payload reaches the store.
const PROTECTED_FIELDS: &[&str] = &["id", "owner", "owner_id", "created_at", "updated_at"];

/// A blank value means "no change": empty or whitespace-only strings and JSON
/// nulls are dropped so they never erase a stored field.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Strip protected keys and blank values from a client payload. Used for both
/// create and patch bodies; what remains is safe to persist or merge as-is.
pub fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    fields.retain(|key, value| !PROTECTED_FIELDS.contains(&key.as_str()) && !is_blank(value));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_blank_fields_are_dropped() {
        let fields = map(json!({
            "name": "Joe's",
            "city": "",
            "address": "   ",
            "price": null,
        }));

        let clean = sanitize_fields(fields);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["name"], "Joe's");
    }

    #[test]
    fn test_owner_reassignment_is_stripped() {
        let fields = map(json!({
            "owner": "4dd14074-0b77-4a11-ad5f-bd4b9407f9dc",
            "owner_id": "4dd14074-0b77-4a11-ad5f-bd4b9407f9dc",
            "id": "not-yours-to-set",
            "name": "Bob's",
        }));

        let clean = sanitize_fields(fields);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["name"], "Bob's");
    }

    #[test]
    fn test_non_string_scalars_are_kept() {
        let fields = map(json!({
            "price": 4,
            "open": false,
            "tags": [],
        }));

        let clean = sanitize_fields(fields);
        assert_eq!(clean["price"], 4);
        assert_eq!(clean["open"], false);
        assert_eq!(clean["tags"], json!([]));
    }
}
