//! The affordance record and the engine that builds it.
//!
//! ```text
//! Operation ──► Verb::is_required ─────────────────────────────► required
//!           └─► Verb::is_mutating ? body_type ─► Introspector ─► properties
//! ```
//!
//! Non-mutating verbs never reach the body locator, so their properties are
//! empty by construction. A mutating operation without a body parameter also
//! yields empty properties; that is not an error.

use serde::Serialize;

use crate::config::InferenceConfig;
use crate::link::Link;
use crate::observe::{InferenceEvent, InferenceObserver, TracingObserver};
use crate::operation::Operation;
use crate::schema::{Introspector, Properties, SchemaError, SchemaSource};
use crate::verb::Verb;

/// What a client must supply to invoke one operation.
///
/// Immutable once built: fields are private and there is no way to construct
/// one except through [`AffordanceBuilder::build`] or [`build_affordance`].
/// `properties` is empty unless the verb is `POST`, `PUT` or `PATCH`.
///
/// Serialises as:
///
/// ```json
/// {
///   "operation_name": "createEmployee",
///   "verb": "POST",
///   "required": true,
///   "properties": { "age": "integer", "name": "string" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordance {
    operation_name: String,
    verb: Verb,
    required: bool,
    properties: Properties,
}

impl Affordance {
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    /// The verb's canonical string form, e.g. `"PATCH"`.
    pub fn verb_str(&self) -> &str {
        self.verb.as_str()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The affordances already attached to `link`, in attachment order.
    pub fn by_link(link: &Link) -> &[Affordance] {
        link.affordances()
    }
}

/// Builds [`Affordance`]s against a schema source.
///
/// Defaults to [`InferenceConfig::default`] and the [`TracingObserver`].
pub struct AffordanceBuilder<'a> {
    schemas: &'a dyn SchemaSource,
    config: InferenceConfig,
    observer: &'a dyn InferenceObserver,
}

impl<'a> AffordanceBuilder<'a> {
    pub fn new(schemas: &'a dyn SchemaSource) -> Self {
        Self {
            schemas,
            config: InferenceConfig::default(),
            observer: &TracingObserver,
        }
    }

    pub fn with_config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn InferenceObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Build the affordance for `operation`.
    ///
    /// Errors only come from the schema source (unknown body type,
    /// inheritance cycle, rejected property conflict).
    pub fn build(&self, operation: &Operation) -> Result<Affordance, SchemaError> {
        let name = operation.name.as_str();
        let verb = &operation.verb;
        self.observer
            .observe(&InferenceEvent::Started { operation: name, verb });

        let required = verb.is_required();
        let properties = if verb.is_mutating() {
            self.body_properties(operation)?
        } else {
            self.observer
                .observe(&InferenceEvent::BodySkipped { operation: name, verb });
            Properties::new()
        };

        self.observer.observe(&InferenceEvent::Completed {
            operation: name,
            required,
            property_count: properties.len(),
        });

        Ok(Affordance {
            operation_name: operation.name.clone(),
            verb: verb.clone(),
            required,
            properties,
        })
    }

    fn body_properties(&self, operation: &Operation) -> Result<Properties, SchemaError> {
        let Some(body) = operation.body_parameter() else {
            self.observer.observe(&InferenceEvent::BodyMissing {
                operation: &operation.name,
            });
            return Ok(Properties::new());
        };
        self.observer.observe(&InferenceEvent::BodyLocated {
            operation: &operation.name,
            parameter: &body.name,
            value_type: &body.value_type,
        });
        Introspector::new(self.schemas, &self.config, self.observer).introspect(&body.value_type)
    }
}

/// Build an affordance with the default config, logging through `tracing`.
pub fn build_affordance(
    operation: &Operation,
    schemas: &dyn SchemaSource,
) -> Result<Affordance, SchemaError> {
    AffordanceBuilder::new(schemas).build(operation)
}
