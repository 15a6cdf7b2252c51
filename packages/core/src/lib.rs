//! Affordance inference for hypermedia links.
//!
//! Given an operation descriptor (name, verb, parameters) and a source of
//! type schemas, this crate computes an [`Affordance`]: the verb, whether
//! input is required, and the first-level properties a client should send in
//! the request body. Affordances attach to [`Link`]s so clients can discover
//! how to build a follow-up request without out-of-band documentation.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`verb`] | [`Verb`] and its required/mutating classification |
//! | [`operation`] | [`Operation`], [`Parameter`], [`ParamRole`], body-parameter lookup |
//! | [`types`] | [`ValueType`], [`TypeSchema`], [`PropertyDescriptor`] |
//! | [`schema`] | [`SchemaSource`], [`SchemaRegistry`], [`Describe`], the [`Introspector`] |
//! | [`affordance`] | [`Affordance`] and [`AffordanceBuilder`] |
//! | [`link`] | [`Link`] and [`affordances_by_link`] |
//! | [`config`] | [`InferenceConfig`], [`ConflictPolicy`] |
//! | [`observe`] | [`InferenceObserver`] hook, [`TracingObserver`], [`NoopObserver`] |
//! | [`validation`] | Structural checks via [`validate_schema`], [`validate_operation`], [`validate_catalog`] |
//! | [`catalog`] | JSON [`Catalog`] of types, operations and links |
//! | [`render`] | Plain-text rendering |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use affordance::{build_affordance, Operation, Parameter, SchemaRegistry, TypeSchema, ValueType, Verb};
//!
//! let registry = SchemaRegistry::from_schemas([TypeSchema::new("Person")
//!     .property("name", ValueType::String)
//!     .property("age", ValueType::Integer)]);
//!
//! let create = Operation::new("createPerson", Verb::Post)
//!     .param(Parameter::body("person", ValueType::object("Person")));
//!
//! let affordance = build_affordance(&create, &registry)?;
//! assert!(affordance.is_required());
//! assert_eq!(affordance.properties().len(), 2);
//! ```

pub mod affordance;
pub mod catalog;
pub mod config;
pub mod link;
pub mod observe;
pub mod operation;
pub mod render;
pub mod schema;
pub mod types;
pub mod validation;
pub mod verb;

pub use affordance::{build_affordance, Affordance, AffordanceBuilder};
pub use catalog::{Catalog, CatalogError, LinkSpec};
pub use config::{ConflictPolicy, InferenceConfig};
pub use link::{affordances_by_link, Link};
pub use observe::{InferenceEvent, InferenceObserver, NoopObserver, TracingObserver};
pub use operation::{Operation, ParamRole, Parameter};
pub use schema::{introspect, Describe, Introspector, Properties, SchemaError, SchemaRegistry, SchemaSource};
pub use types::{PropertyDescriptor, TypeSchema, ValueType};
pub use validation::{
    validate_catalog, validate_catalog_with, validate_operation, validate_schema, ValidationError,
};
pub use verb::{ExtensionMethod, Verb};
