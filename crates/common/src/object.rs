//! Runtime object representation for the NumScript VM.
//!
//! Objects are what live in operand-stack slots. They are plain values:
//! copying a slot clones its payload, nothing aliases.

use std::fmt;

/// The kind of an [`Object`], used in type-check diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A single integer.
    Int,
    /// An ordered sequence of integers.
    Array,
}

/// All object kinds, in definition order.
pub const ALL_OBJECT_KINDS: [ObjectKind; 2] = [ObjectKind::Int, ObjectKind::Array];

impl ObjectKind {
    /// Canonical uppercase name.
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Int => "INT",
            ObjectKind::Array => "ARRAY",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tagged runtime value: an integer or an array of integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    /// Scalar integer.
    Int(i64),
    /// Array of integers.
    Array(Vec<i64>),
}

impl Object {
    pub fn from_int(value: i64) -> Self {
        Object::Int(value)
    }

    pub fn from_array(values: impl Into<Vec<i64>>) -> Self {
        Object::Array(values.into())
    }

    /// Returns the kind tag for this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Int(_) => ObjectKind::Int,
            Object::Array(_) => ObjectKind::Array,
        }
    }

    /// Decode the object as text: an Int is a single code point, an Array
    /// is a sequence of code points.
    ///
    /// Returns `None` when the object has no text form. Every current kind
    /// has one; callers still treat `None` as a reportable failure.
    /// Integers that are not valid Unicode scalar values decode to U+FFFD.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Object::Int(code) => Some(decode_code_point(*code).to_string()),
            Object::Array(codes) => Some(codes.iter().copied().map(decode_code_point).collect()),
        }
    }

    /// Human-readable numeric form: the integer itself, or the array's
    /// elements joined by single spaces.
    pub fn represent(&self) -> String {
        match self {
            Object::Int(value) => value.to_string(),
            Object::Array(values) => values
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Condition truthiness: non-zero Int, non-empty Array.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Int(value) => *value != 0,
            Object::Array(values) => !values.is_empty(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.represent())
    }
}

fn decode_code_point(code: i64) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Object::from_int(5).kind(), ObjectKind::Int);
        assert_eq!(Object::from_array(vec![1, 2]).kind(), ObjectKind::Array);
        assert_eq!(Object::from_array(Vec::new()).kind(), ObjectKind::Array);
    }

    #[test]
    fn kind_names() {
        let names: Vec<_> = ALL_OBJECT_KINDS.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["INT", "ARRAY"]);
    }

    #[test]
    fn int_to_text_is_single_char() {
        assert_eq!(Object::from_int(65).to_text().as_deref(), Some("A"));
    }

    #[test]
    fn array_to_text_joins_chars() {
        assert_eq!(
            Object::from_array(vec![104, 105]).to_text().as_deref(),
            Some("hi")
        );
        assert_eq!(Object::from_array(vec![]).to_text().as_deref(), Some(""));
    }

    #[test]
    fn invalid_code_points_use_replacement() {
        assert_eq!(Object::from_int(-1).to_text().as_deref(), Some("\u{FFFD}"));
        assert_eq!(
            Object::from_array(vec![0xD800, 33]).to_text().as_deref(),
            Some("\u{FFFD}!")
        );
    }

    #[test]
    fn represent_int() {
        assert_eq!(Object::from_int(-42).represent(), "-42");
    }

    #[test]
    fn represent_array_space_joined() {
        assert_eq!(Object::from_array(vec![5, 7, 9]).represent(), "5 7 9");
        assert_eq!(Object::from_array(vec![]).represent(), "");
    }

    #[test]
    fn display_matches_represent() {
        let obj = Object::from_array(vec![1, -2]);
        assert_eq!(obj.to_string(), obj.represent());
    }

    #[test]
    fn truthiness() {
        assert!(Object::from_int(1).is_truthy());
        assert!(Object::from_int(-3).is_truthy());
        assert!(!Object::from_int(0).is_truthy());
        assert!(Object::from_array(vec![0]).is_truthy());
        assert!(!Object::from_array(vec![]).is_truthy());
    }

    #[test]
    fn clone_does_not_alias() {
        let original = Object::from_array(vec![1, 2, 3]);
        let mut copy = original.clone();
        if let Object::Array(values) = &mut copy {
            values.push(4);
        }
        assert_eq!(original, Object::from_array(vec![1, 2, 3]));
        assert_ne!(original, copy);
    }
}
