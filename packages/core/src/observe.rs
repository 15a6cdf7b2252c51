//! Observability hook for the inference engine.
//!
//! The engine reports what it does through an [`InferenceObserver`] and never
//! branches on it. [`TracingObserver`] (the default) forwards events to
//! `tracing`; [`NoopObserver`] drops them. Any `Fn(&InferenceEvent)` closure
//! is an observer too.

use crate::types::ValueType;
use crate::verb::Verb;

/// A structured event emitted while building an affordance.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceEvent<'a> {
    Started {
        operation: &'a str,
        verb: &'a Verb,
    },
    /// The verb takes no body, so the locator was never consulted.
    BodySkipped {
        operation: &'a str,
        verb: &'a Verb,
    },
    BodyLocated {
        operation: &'a str,
        parameter: &'a str,
        value_type: &'a ValueType,
    },
    /// A mutating operation declares no body parameter.
    BodyMissing { operation: &'a str },
    PropertyDiscovered {
        type_name: &'a str,
        property: &'a str,
        value_type: &'a ValueType,
    },
    /// A property source declared a name already seen with another type and
    /// the configured policy resolved it.
    PropertyConflict {
        type_name: &'a str,
        property: &'a str,
        kept: &'a ValueType,
        discarded: &'a ValueType,
    },
    Completed {
        operation: &'a str,
        required: bool,
        property_count: usize,
    },
}

/// Receives [`InferenceEvent`]s.
pub trait InferenceObserver: Send + Sync {
    fn observe(&self, event: &InferenceEvent<'_>);
}

impl<F> InferenceObserver for F
where
    F: Fn(&InferenceEvent<'_>) + Send + Sync,
{
    fn observe(&self, event: &InferenceEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InferenceObserver for NoopObserver {
    fn observe(&self, _event: &InferenceEvent<'_>) {}
}

/// Forwards events to `tracing` under the `affordance` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl InferenceObserver for TracingObserver {
    fn observe(&self, event: &InferenceEvent<'_>) {
        match event {
            InferenceEvent::Started { operation, verb } => {
                tracing::debug!(target: "affordance", %operation, %verb, "building affordance");
            }
            InferenceEvent::BodySkipped { operation, verb } => {
                tracing::trace!(target: "affordance", %operation, %verb, "verb takes no body");
            }
            InferenceEvent::BodyLocated {
                operation,
                parameter,
                value_type,
            } => {
                tracing::debug!(
                    target: "affordance",
                    %operation, %parameter, %value_type,
                    "request body parameter located"
                );
            }
            InferenceEvent::BodyMissing { operation } => {
                tracing::debug!(target: "affordance", %operation, "no request body parameter");
            }
            InferenceEvent::PropertyDiscovered {
                type_name,
                property,
                value_type,
            } => {
                tracing::trace!(target: "affordance", %type_name, %property, %value_type, "property");
            }
            InferenceEvent::PropertyConflict {
                type_name,
                property,
                kept,
                discarded,
            } => {
                tracing::warn!(
                    target: "affordance",
                    %type_name, %property, %kept, %discarded,
                    "conflicting property declarations"
                );
            }
            InferenceEvent::Completed {
                operation,
                required,
                property_count,
            } => {
                tracing::debug!(
                    target: "affordance",
                    %operation, required, property_count,
                    "affordance built"
                );
            }
        }
    }
}
