//! Shared fixtures for the affordance conformance test suite.
//!
//! Every fixture is a factory function returning a fully valid value; there
//! is no "default" affordance or half-built operation to start from.
//!
//! | Fixture | Shape |
//! |---------|-------|
//! | [`person_schema`] | `Person { class, name: string, age: integer }` |
//! | [`employee_schema`] | `Employee extends Person { role: string, manager: Person }` |
//! | [`registry`] | both of the above |
//! | [`operation_with_body`] | `path id` + `body Person` under any verb |
//! | [`operation_without_body`] | `path id` + `query expand` under any verb |
//! | [`RecordingObserver`] | collects event tags for assertions |

use std::sync::Mutex;

use affordance::{
    InferenceEvent, InferenceObserver, Operation, Parameter, SchemaRegistry, TypeSchema,
    ValueType, Verb,
};

/// Every verb the classifier knows by name.
pub const ALL_VERBS: [Verb; 8] = [
    Verb::Get,
    Verb::Head,
    Verb::Post,
    Verb::Put,
    Verb::Patch,
    Verb::Delete,
    Verb::Options,
    Verb::Trace,
];

/// `Person`, including the `class` meta-property that must never surface.
pub fn person_schema() -> TypeSchema {
    TypeSchema::new("Person")
        .property("class", ValueType::String)
        .property("name", ValueType::String)
        .property("age", ValueType::Integer)
}

pub fn employee_schema() -> TypeSchema {
    TypeSchema::new("Employee")
        .extends("Person")
        .property("role", ValueType::String)
        .property("manager", ValueType::object("Person"))
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::from_schemas([person_schema(), employee_schema()])
}

pub fn operation_with_body(name: &str, verb: Verb) -> Operation {
    Operation::new(name, verb)
        .param(Parameter::path("id", ValueType::Integer))
        .param(Parameter::body("person", ValueType::object("Person")))
}

pub fn operation_without_body(name: &str, verb: Verb) -> Operation {
    Operation::new(name, verb)
        .param(Parameter::path("id", ValueType::Integer))
        .param(Parameter::query("expand", ValueType::Boolean))
}

/// An observer that records a short tag per event.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags recorded so far, in emission order.
    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl InferenceObserver for RecordingObserver {
    fn observe(&self, event: &InferenceEvent<'_>) {
        let tag = match event {
            InferenceEvent::Started { operation, .. } => format!("started:{operation}"),
            InferenceEvent::BodySkipped { operation, .. } => format!("skipped:{operation}"),
            InferenceEvent::BodyLocated { parameter, .. } => format!("located:{parameter}"),
            InferenceEvent::BodyMissing { operation } => format!("missing:{operation}"),
            InferenceEvent::PropertyDiscovered { property, .. } => format!("property:{property}"),
            InferenceEvent::PropertyConflict { property, .. } => format!("conflict:{property}"),
            InferenceEvent::Completed { operation, .. } => format!("completed:{operation}"),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(tag);
        }
    }
}
