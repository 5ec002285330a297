use axum_helpers::{Sanitize, escape_html};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{ReferenceError, ReferenceResult};
use crate::kind::ReferenceKind;

/// Stored reference row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub id: i32,
    pub name: String,
}

/// Outward view of a row, serialized as `{ "id": .., "<kind>_name": .. }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceView {
    pub kind: ReferenceKind,
    pub id: i32,
    pub name: String,
}

impl ReferenceView {
    pub fn new(kind: ReferenceKind, entry: ReferenceEntry) -> Self {
        Self {
            kind,
            id: entry.id,
            name: entry.name,
        }
    }
}

impl Serialize for ReferenceView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry(self.kind.name_field(), &self.name)?;
        map.end()
    }
}

impl Sanitize for ReferenceView {
    fn sanitize(self) -> Self {
        Self {
            name: escape_html(&self.name),
            ..self
        }
    }
}

/// Pull the kind's name field out of a request body.
///
/// Absent, `null`, empty and non-string values all count as missing.
pub fn name_from_body(kind: ReferenceKind, body: &Map<String, Value>) -> ReferenceResult<String> {
    match body.get(kind.name_field()) {
        Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
        _ => Err(ReferenceError::MissingField(kind.name_field())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_view_uses_kind_field_name() {
        let view = ReferenceView::new(
            ReferenceKind::Color,
            ReferenceEntry {
                id: 2,
                name: "red".into(),
            },
        );
        assert_eq!(serde_json::to_value(&view).unwrap(), json!({ "id": 2, "color_name": "red" }));
    }

    #[test]
    fn test_sanitize_escapes_name() {
        let view = ReferenceView {
            kind: ReferenceKind::Make,
            id: 1,
            name: "<script>alert(1)</script>".into(),
        };
        assert_eq!(view.sanitize().name, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_name_from_body() {
        let kind = ReferenceKind::Location;
        assert_eq!(
            name_from_body(kind, &body(json!({ "location_name": "red bank" }))).unwrap(),
            "red bank"
        );

        for missing in [
            json!({}),
            json!({ "location_name": null }),
            json!({ "location_name": "" }),
            json!({ "location_name": 7 }),
            json!({ "make_name": "ford" }),
        ] {
            assert!(matches!(
                name_from_body(kind, &body(missing)),
                Err(ReferenceError::MissingField("location_name"))
            ));
        }
    }
}
