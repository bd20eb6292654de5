//! Value classification
//!
//! Decides how a single value is presented: inline, or as a drill-down target.

use crate::value::DecodedValue;

/// Rendering category of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Scalar,
    PlainObject,
    ArrayOfScalars,
    ArrayOfObjects,
}

impl Category {
    /// Composite categories open a nested view instead of printing inline
    pub fn is_drill_down(self) -> bool {
        matches!(self, Category::PlainObject | Category::ArrayOfObjects)
    }
}

/// Color tag for a leaf, decided by the value's own type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
    Null,
    Other,
}

/// An array is `ArrayOfObjects` as soon as one element is an object or array.
pub fn classify(value: &DecodedValue) -> Category {
    match value {
        DecodedValue::Object(_) => Category::PlainObject,
        DecodedValue::Array(items) => {
            if items.iter().any(DecodedValue::is_composite) {
                Category::ArrayOfObjects
            } else {
                Category::ArrayOfScalars
            }
        }
        _ => Category::Scalar,
    }
}

pub fn scalar_kind(value: &DecodedValue) -> ScalarKind {
    match value {
        DecodedValue::String(_) => ScalarKind::String,
        DecodedValue::Number(_) => ScalarKind::Number,
        DecodedValue::Bool(_) => ScalarKind::Boolean,
        DecodedValue::Null => ScalarKind::Null,
        DecodedValue::Object(_) | DecodedValue::Array(_) => ScalarKind::Other,
    }
}

/// `[v1, v2, ...]` using each scalar's plain string form
pub fn inline_list(items: &[DecodedValue]) -> String {
    let joined = items
        .iter()
        .map(DecodedValue::plain_text)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::parse_json;

    fn classify_json(text: &str) -> Category {
        classify(&parse_json(text).unwrap())
    }

    #[test]
    fn test_scalars() {
        assert_eq!(classify_json("1"), Category::Scalar);
        assert_eq!(classify_json("\"x\""), Category::Scalar);
        assert_eq!(classify_json("true"), Category::Scalar);
        assert_eq!(classify_json("null"), Category::Scalar);
    }

    #[test]
    fn test_mixed_array_is_composite() {
        assert_eq!(classify_json(r#"[1, 2, {"x":1}]"#), Category::ArrayOfObjects);
        assert_eq!(classify_json("[[1], 2]"), Category::ArrayOfObjects);
    }

    #[test]
    fn test_scalar_array_renders_inline() {
        let value = parse_json("[1,2,3]").unwrap();
        assert_eq!(classify(&value), Category::ArrayOfScalars);
        match value {
            DecodedValue::Array(items) => assert_eq!(inline_list(&items), "[1, 2, 3]"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_array_is_scalar_list() {
        assert_eq!(classify_json("[]"), Category::ArrayOfScalars);
        assert!(!Category::ArrayOfScalars.is_drill_down());
        assert!(Category::PlainObject.is_drill_down());
    }

    #[test]
    fn test_scalar_kind_uses_own_type() {
        // a numeric-looking string is still a string
        assert_eq!(scalar_kind(&parse_json("\"42\"").unwrap()), ScalarKind::String);
        assert_eq!(scalar_kind(&parse_json("42").unwrap()), ScalarKind::Number);
        assert_eq!(scalar_kind(&parse_json("false").unwrap()), ScalarKind::Boolean);
        assert_eq!(scalar_kind(&parse_json("null").unwrap()), ScalarKind::Null);
        assert_eq!(scalar_kind(&parse_json("{}").unwrap()), ScalarKind::Other);
    }
}
