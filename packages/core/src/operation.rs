//! Operation descriptors: what the inference engine is asked to describe.
//!
//! An [`Operation`] is supplied by the caller (a router, a code generator, or
//! a hand-written catalog). Each [`Parameter`] carries an explicit
//! [`ParamRole`], so locating the request body is a scan over a field rather
//! than over annotations.

use serde::{Deserialize, Serialize};

use crate::types::ValueType;
use crate::verb::Verb;

/// Where a parameter's value comes from in the incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamRole {
    /// Deserialised from the request payload.
    Body,
    Path,
    Query,
    Header,
    Cookie,
}

impl std::fmt::Display for ParamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamRole::Body => write!(f, "body"),
            ParamRole::Path => write!(f, "path"),
            ParamRole::Query => write!(f, "query"),
            ParamRole::Header => write!(f, "header"),
            ParamRole::Cookie => write!(f, "cookie"),
        }
    }
}

/// A declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub value_type: ValueType,

    pub role: ParamRole,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value_type: ValueType, role: ParamRole) -> Self {
        Self {
            name: name.into(),
            value_type,
            role,
        }
    }

    /// A request-body parameter.
    pub fn body(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, value_type, ParamRole::Body)
    }

    pub fn path(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, value_type, ParamRole::Path)
    }

    pub fn query(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, value_type, ParamRole::Query)
    }
}

/// A single request-handling operation.
///
/// ```json
/// {
///   "name": "updateEmployee",
///   "verb": "PUT",
///   "parameters": [
///     { "name": "id", "type": "integer", "role": "path" },
///     { "name": "employee", "type": "Employee", "role": "body" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub verb: Verb,

    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Operation {
    pub fn new(name: impl Into<String>, verb: Verb) -> Self {
        Self {
            name: name.into(),
            verb,
            parameters: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The first parameter, in declaration order, whose role is
    /// [`ParamRole::Body`].
    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.role == ParamRole::Body)
    }

    /// The declared type of [`body_parameter`](Self::body_parameter).
    ///
    /// `None` is not an error: the operation simply has no body to describe.
    pub fn body_type(&self) -> Option<&ValueType> {
        self.body_parameter().map(|p| &p.value_type)
    }
}
