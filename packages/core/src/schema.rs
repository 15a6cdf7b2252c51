//! Schema capability and the property introspector.
//!
//! Types describe their first-level properties ahead of time, either through
//! a [`TypeSchema`] value (loaded from a catalog, generated at build time) or
//! by implementing [`Describe`]. A [`SchemaSource`] hands those declarations
//! to the [`Introspector`], which flattens supertypes, drops the
//! meta-property, and resolves name conflicts into a [`Properties`] map.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::config::{ConflictPolicy, InferenceConfig};
use crate::observe::{InferenceEvent, InferenceObserver, TracingObserver};
use crate::types::{PropertyDescriptor, TypeSchema, ValueType};

/// Property name → declared type. Sorted by name; order carries no meaning.
pub type Properties = BTreeMap<String, ValueType>;

/// Errors raised by a [`SchemaSource`] or while flattening its answers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no schema declared for type {0:?}")]
    UnknownType(String),

    #[error("inheritance cycle: {}", .0.join(" -> "))]
    InheritanceCycle(Vec<String>),

    #[error(
        "property {property:?} of {type_name:?} is declared as both {first} and {second}"
    )]
    ConflictingProperty {
        type_name: String,
        property: String,
        first: ValueType,
        second: ValueType,
    },

    /// A source-specific failure (e.g. a backing store could not be read).
    #[error("schema source failed for {type_name:?}: {message}")]
    Source { type_name: String, message: String },
}

/// Resolves a type name to its declared schema.
pub trait SchemaSource: Send + Sync {
    fn schema(&self, type_name: &str) -> Result<Cow<'_, TypeSchema>, SchemaError>;
}

/// A Rust type that can hand-declare its own schema.
///
/// ```rust,ignore
/// struct Person { name: String, age: u32 }
///
/// impl Describe for Person {
///     fn type_schema() -> TypeSchema {
///         TypeSchema::new("Person")
///             .property("name", ValueType::String)
///             .property("age", ValueType::Integer)
///     }
/// }
/// ```
pub trait Describe {
    fn type_schema() -> TypeSchema;
}

/// In-memory [`SchemaSource`] keyed by type name.
///
/// Inserting a schema whose name is already present replaces the earlier one.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schemas(iter: impl IntoIterator<Item = TypeSchema>) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.insert(schema);
        }
        registry
    }

    pub fn insert(&mut self, schema: TypeSchema) {
        self.types.insert(schema.name.clone(), schema);
    }

    /// Register the schema a [`Describe`] type declares for itself.
    pub fn register<T: Describe>(&mut self) -> &mut Self {
        self.insert(T::type_schema());
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeSchema> {
        self.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all schemas in unspecified order.
    pub fn schemas(&self) -> impl Iterator<Item = &TypeSchema> {
        self.types.values()
    }
}

impl SchemaSource for SchemaRegistry {
    fn schema(&self, type_name: &str) -> Result<Cow<'_, TypeSchema>, SchemaError> {
        self.types
            .get(type_name)
            .map(Cow::Borrowed)
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))
    }
}

/// Enumerates the first-level properties of a type.
pub struct Introspector<'a> {
    schemas: &'a dyn SchemaSource,
    config: &'a InferenceConfig,
    observer: &'a dyn InferenceObserver,
}

impl<'a> Introspector<'a> {
    pub fn new(
        schemas: &'a dyn SchemaSource,
        config: &'a InferenceConfig,
        observer: &'a dyn InferenceObserver,
    ) -> Self {
        Self {
            schemas,
            config,
            observer,
        }
    }

    /// Properties of a declared value type.
    ///
    /// Only object types have properties. Scalars, arrays and maps yield an
    /// empty map without consulting the schema source.
    pub fn introspect(&self, value_type: &ValueType) -> Result<Properties, SchemaError> {
        match value_type.object_name() {
            Some(name) => self.introspect_type(name),
            None => Ok(Properties::new()),
        }
    }

    /// Properties of a named object type, supertypes included.
    ///
    /// Each type in the hierarchy is read once. A base reached through
    /// several paths (diamond inheritance) contributes its properties only at
    /// its first position, which is what `KeepLast` compares against.
    pub fn introspect_type(&self, type_name: &str) -> Result<Properties, SchemaError> {
        let mut walk = Walk::default();
        self.flatten(type_name, &mut walk)?;

        let mut properties = Properties::new();
        for (declared_by, descriptor) in walk.sources {
            if descriptor.name == self.config.meta_property {
                continue;
            }
            self.merge(type_name, &declared_by, descriptor, &mut properties)?;
        }
        Ok(properties)
    }

    /// Collect `(declaring type, property)` pairs: supertypes in `extends`
    /// order first, then the type's own declarations.
    fn flatten(&self, type_name: &str, walk: &mut Walk) -> Result<(), SchemaError> {
        if walk.path.iter().any(|seen| seen == type_name) {
            let mut cycle = walk.path.clone();
            cycle.push(type_name.to_string());
            return Err(SchemaError::InheritanceCycle(cycle));
        }
        if walk.done.contains(type_name) {
            return Ok(());
        }
        let schema = self.schemas.schema(type_name)?;

        walk.path.push(type_name.to_string());
        for supertype in &schema.extends {
            self.flatten(supertype, walk)?;
        }
        walk.path.pop();
        walk.done.insert(type_name.to_string());

        walk.sources.extend(
            schema
                .properties
                .iter()
                .map(|p| (schema.name.clone(), p.clone())),
        );
        Ok(())
    }

    fn merge(
        &self,
        root: &str,
        declared_by: &str,
        descriptor: PropertyDescriptor,
        properties: &mut Properties,
    ) -> Result<(), SchemaError> {
        let PropertyDescriptor { name, value_type } = descriptor;

        let Some(existing) = properties.get(&name) else {
            self.observer.observe(&InferenceEvent::PropertyDiscovered {
                type_name: declared_by,
                property: &name,
                value_type: &value_type,
            });
            properties.insert(name, value_type);
            return Ok(());
        };
        if *existing == value_type {
            return Ok(());
        }

        match self.config.conflict_policy {
            ConflictPolicy::Reject => Err(SchemaError::ConflictingProperty {
                type_name: root.to_string(),
                property: name,
                first: existing.clone(),
                second: value_type,
            }),
            ConflictPolicy::KeepFirst => {
                self.observer.observe(&InferenceEvent::PropertyConflict {
                    type_name: root,
                    property: &name,
                    kept: existing,
                    discarded: &value_type,
                });
                Ok(())
            }
            ConflictPolicy::KeepLast => {
                self.observer.observe(&InferenceEvent::PropertyConflict {
                    type_name: root,
                    property: &name,
                    kept: &value_type,
                    discarded: existing,
                });
                properties.insert(name, value_type);
                Ok(())
            }
        }
    }
}

/// State of one hierarchy walk.
#[derive(Default)]
struct Walk {
    /// Types on the current `extends` chain, root first.
    path: Vec<String>,
    /// Types whose properties are already in `sources`.
    done: HashSet<String>,
    sources: Vec<(String, PropertyDescriptor)>,
}

/// [`Introspector::introspect`] with the default config, logging through
/// `tracing`.
pub fn introspect(
    schemas: &dyn SchemaSource,
    value_type: &ValueType,
) -> Result<Properties, SchemaError> {
    let config = InferenceConfig::default();
    Introspector::new(schemas, &config, &TracingObserver).introspect(value_type)
}
