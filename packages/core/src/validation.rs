use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::InferenceConfig;
use crate::observe::NoopObserver;
use crate::operation::{Operation, ParamRole};
use crate::schema::{Introspector, SchemaError};
use crate::types::{TypeSchema, ValueType};

/// Structural problems in type schemas, operations, or a whole catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("type name must not be empty")]
    EmptyTypeName,

    #[error("type name {0:?} is invalid; expected dotted identifiers (e.g. com.example.Person)")]
    InvalidTypeName(String),

    #[error("type name {0:?} is reserved for a built-in value type")]
    ReservedTypeName(String),

    #[error("type {0:?} extends itself")]
    SelfExtension(String),

    #[error("property {property:?} of type {type_name:?} is not a valid property name")]
    InvalidPropertyName { type_name: String, property: String },

    #[error("property {property:?} is declared more than once in type {type_name:?}")]
    DuplicateProperty { type_name: String, property: String },

    #[error("operation name must not be empty")]
    EmptyOperationName,

    #[error("parameter at index {index} of operation {operation:?} has an empty name")]
    EmptyParameterName { operation: String, index: usize },

    #[error("operation {operation:?} declares {count} body parameters; at most one is allowed")]
    MultipleBodyParameters { operation: String, count: usize },

    #[error("type {0:?} is declared more than once")]
    DuplicateType(String),

    #[error("operation {0:?} is declared more than once")]
    DuplicateOperation(String),

    #[error("type {type_name:?} extends undeclared type {supertype:?}")]
    UndeclaredSupertype { type_name: String, supertype: String },

    #[error("body of operation {operation:?} has undeclared type {type_name:?}")]
    UndeclaredBodyType { operation: String, type_name: String },

    /// The type's hierarchy cannot be flattened (cycle, rejected conflict).
    #[error("type {type_name:?} has no usable property list: {source}")]
    Unresolvable {
        type_name: String,
        source: SchemaError,
    },
}

/// Validate a single [`TypeSchema`] in isolation.
///
/// Returns the first problem found, checking the name, then `extends`, then
/// properties in declaration order.
pub fn validate_schema(schema: &TypeSchema) -> Result<(), ValidationError> {
    validate_type_name(&schema.name)?;

    if schema.extends.iter().any(|s| s == &schema.name) {
        return Err(ValidationError::SelfExtension(schema.name.clone()));
    }

    let mut seen = HashSet::new();
    for p in &schema.properties {
        if !PROPERTY_NAME_RE.is_match(&p.name) {
            return Err(ValidationError::InvalidPropertyName {
                type_name: schema.name.clone(),
                property: p.name.clone(),
            });
        }
        if !seen.insert(p.name.as_str()) {
            return Err(ValidationError::DuplicateProperty {
                type_name: schema.name.clone(),
                property: p.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate a single [`Operation`] in isolation.
///
/// An operation with several body parameters still builds (the first one
/// wins) but is reported here.
pub fn validate_operation(operation: &Operation) -> Result<(), ValidationError> {
    if operation.name.is_empty() {
        return Err(ValidationError::EmptyOperationName);
    }

    for (index, p) in operation.parameters.iter().enumerate() {
        if p.name.is_empty() {
            return Err(ValidationError::EmptyParameterName {
                operation: operation.name.clone(),
                index,
            });
        }
    }

    let count = operation
        .parameters
        .iter()
        .filter(|p| p.role == ParamRole::Body)
        .count();
    if count > 1 {
        return Err(ValidationError::MultipleBodyParameters {
            operation: operation.name.clone(),
            count,
        });
    }

    Ok(())
}

/// Validate every type and operation in a catalog, plus cross-references:
/// supertypes and body object types must be declared in the same catalog,
/// and every type must flatten under the default [`InferenceConfig`].
///
/// Returns every problem found (at most one per type or operation, plus one
/// per dangling reference). An empty vector means the catalog is valid.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    validate_catalog_with(catalog, &InferenceConfig::default())
}

/// [`validate_catalog`], flattening types under `config` so the conflict
/// policy matches the one affordances will be built with.
pub fn validate_catalog_with(catalog: &Catalog, config: &InferenceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut declared = HashSet::new();
    for schema in &catalog.types {
        if let Err(e) = validate_schema(schema) {
            errors.push(e);
        }
        if !declared.insert(schema.name.as_str()) {
            errors.push(ValidationError::DuplicateType(schema.name.clone()));
        }
    }

    for schema in &catalog.types {
        for supertype in &schema.extends {
            if !declared.contains(supertype.as_str()) {
                errors.push(ValidationError::UndeclaredSupertype {
                    type_name: schema.name.clone(),
                    supertype: supertype.clone(),
                });
            }
        }
    }

    // Dangling supertypes are already reported above.
    let registry = catalog.registry();
    let introspector = Introspector::new(&registry, config, &NoopObserver);
    let mut flattened = HashSet::new();
    for schema in &catalog.types {
        if !flattened.insert(schema.name.as_str()) {
            continue;
        }
        match introspector.introspect_type(&schema.name) {
            Ok(_) | Err(SchemaError::UnknownType(_)) => {}
            Err(source) => errors.push(ValidationError::Unresolvable {
                type_name: schema.name.clone(),
                source,
            }),
        }
    }

    let mut operations = HashSet::new();
    for op in &catalog.operations {
        if let Err(e) = validate_operation(op) {
            errors.push(e);
        }
        if !operations.insert(op.name.as_str()) {
            errors.push(ValidationError::DuplicateOperation(op.name.clone()));
        }
        if let Some(type_name) = op.body_type().and_then(ValueType::object_name) {
            if !declared.contains(type_name) {
                errors.push(ValidationError::UndeclaredBodyType {
                    operation: op.name.clone(),
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    errors
}

// --- helpers -----------------------------------------------------------------

fn validate_type_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyTypeName);
    }
    if RESERVED_TYPE_NAMES.contains(&name) {
        return Err(ValidationError::ReservedTypeName(name.to_string()));
    }
    if !TYPE_NAME_RE.is_match(name) {
        return Err(ValidationError::InvalidTypeName(name.to_string()));
    }
    Ok(())
}

const RESERVED_TYPE_NAMES: &[&str] = &["string", "integer", "number", "boolean", "array", "map"];

/// Dotted identifiers: `Person`, `com.example.Person`.
pub(crate) static TYPE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("invalid type name regex")
});

/// `^[A-Za-z_@$][A-Za-z0-9_$-]*$`
static PROPERTY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_@$][A-Za-z0-9_$\-]*$").expect("invalid property name regex")
});

// --- tests -------------------------------------------------------------------
