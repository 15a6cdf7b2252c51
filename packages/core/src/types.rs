//! Value types and statically declared type schemas.
//!
//! A [`ValueType`] is the handle an affordance reports for each property. A
//! [`TypeSchema`] declares the first-level properties of one named object
//! type; the [`schema`](crate::schema) module resolves them into a property
//! map.

use serde::{Deserialize, Serialize};

use crate::validation::TYPE_NAME_RE;

/// The declared type of a parameter or property.
///
/// Serialises as a compact string:
///
/// | Variant | Text |
/// |---------|------|
/// | [`ValueType::String`] | `string` |
/// | [`ValueType::Integer`] | `integer` |
/// | [`ValueType::Number`] | `number` |
/// | [`ValueType::Boolean`] | `boolean` |
/// | [`ValueType::Array`] | `array<T>` |
/// | [`ValueType::Map`] | `map<T>` |
/// | [`ValueType::Object`] | the type name, e.g. `Address` |
///
/// Object types are reported by name and never expanded in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<ValueType>),
    /// String-keyed map with values of the inner type.
    Map(Box<ValueType>),
    /// A named object type, resolvable through a
    /// [`SchemaSource`](crate::schema::SchemaSource).
    Object(String),
}

impl ValueType {
    /// Shorthand for [`ValueType::Object`].
    pub fn object(name: impl Into<String>) -> Self {
        ValueType::Object(name.into())
    }

    /// Shorthand for [`ValueType::Array`].
    pub fn array_of(inner: ValueType) -> Self {
        ValueType::Array(Box::new(inner))
    }

    /// The object type name, if this is an object type.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            ValueType::Object(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Number => write!(f, "number"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Array(inner) => write!(f, "array<{inner}>"),
            ValueType::Map(inner) => write!(f, "map<{inner}>"),
            ValueType::Object(name) => write!(f, "{name}"),
        }
    }
}

/// Parses a [`ValueType`] from its textual form.
///
/// Returns `Err` with a descriptive message if the string is neither a known
/// scalar, a well-formed `array<…>`/`map<…>`, nor a valid type name.
impl std::str::FromStr for ValueType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "string" => return Ok(ValueType::String),
            "integer" => return Ok(ValueType::Integer),
            "number" => return Ok(ValueType::Number),
            "boolean" => return Ok(ValueType::Boolean),
            _ => {}
        }
        if let Some(inner) = generic_argument(s, "array") {
            return Ok(ValueType::Array(Box::new(inner.parse()?)));
        }
        if let Some(inner) = generic_argument(s, "map") {
            return Ok(ValueType::Map(Box::new(inner.parse()?)));
        }
        if TYPE_NAME_RE.is_match(s) {
            Ok(ValueType::Object(s.to_string()))
        } else {
            Err(format!(
                "invalid value type {s:?}; expected string, integer, number, boolean, \
                 array<T>, map<T>, or a type name"
            ))
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}

/// `array<T>` → `Some("T")` for `head == "array"`.
fn generic_argument<'a>(s: &'a str, head: &str) -> Option<&'a str> {
    s.strip_prefix(head)?.strip_prefix('<')?.strip_suffix('>')
}

/// One named, typed property of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// The statically declared shape of a named object type.
///
/// `extends` lists supertypes whose properties are inherited. They are
/// consulted in order before the type's own `properties`.
///
/// ```json
/// {
///   "name": "Employee",
///   "extends": ["Person"],
///   "properties": [ { "name": "role", "type": "string" } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,

    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl TypeSchema {
    /// An object type with no supertypes and no properties yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Append a property declaration.
    pub fn property(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.properties.push(PropertyDescriptor::new(name, value_type));
        self
    }

    /// Append a supertype.
    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.extends.push(supertype.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars_and_generics() {
        assert_eq!("integer".parse::<ValueType>().unwrap(), ValueType::Integer);
        assert_eq!(
            "array<map<Address>>".parse::<ValueType>().unwrap(),
            ValueType::array_of(ValueType::Map(Box::new(ValueType::object("Address"))))
        );
    }

    #[test]
    fn qualified_type_names_are_objects() {
        let vt: ValueType = "com.example.Person".parse().unwrap();
        assert_eq!(vt.object_name(), Some("com.example.Person"));
    }

    #[test]
    fn rejects_malformed_type() {
        assert!("array<".parse::<ValueType>().is_err());
        assert!("two words".parse::<ValueType>().is_err());
        assert!("".parse::<ValueType>().is_err());
    }

    #[test]
    fn display_matches_parse_input() {
        for text in ["string", "array<integer>", "map<boolean>", "Order"] {
            assert_eq!(text.parse::<ValueType>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn schema_deserialises_with_defaults() {
        let json = r#"{ "name": "Tag", "properties": [ { "name": "label", "type": "string" } ] }"#;
        let schema: TypeSchema = serde_json::from_str(json).unwrap();
        assert!(schema.extends.is_empty());
        assert_eq!(schema.properties[0].value_type, ValueType::String);
    }
}
