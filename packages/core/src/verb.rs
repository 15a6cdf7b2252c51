//! HTTP verbs and the rules that classify them.

use serde::{Deserialize, Serialize};

/// The HTTP method an operation is bound to.
///
/// Serialises as its canonical upper-case string (e.g. `"POST"`). Parsing is
/// case-insensitive and never fails: anything unrecognised becomes
/// [`Verb::Other`], which classifies as neither required nor mutating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    /// An extension method. Only obtainable by parsing, so the name is
    /// always upper-case and never one of the methods above.
    Other(ExtensionMethod),
}

/// The name of a non-standard method, e.g. `PROPFIND`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionMethod(String);

impl ExtensionMethod {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExtensionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Verb {
    /// Whether a client must supply input for this verb to be valid.
    ///
    /// Only `POST` and `PUT` require input. `PATCH` carries a body but every
    /// field in it is optional.
    pub fn is_required(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }

    /// Whether this verb takes a request body worth describing.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch)
    }

    /// The canonical upper-case method name.
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Other(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Verb::from(s))
    }
}

impl From<&str> for Verb {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Verb::Get,
            "HEAD" => Verb::Head,
            "POST" => Verb::Post,
            "PUT" => Verb::Put,
            "PATCH" => Verb::Patch,
            "DELETE" => Verb::Delete,
            "OPTIONS" => Verb::Options,
            "TRACE" => Verb::Trace,
            other => Verb::Other(ExtensionMethod(other.to_string())),
        }
    }
}

impl From<String> for Verb {
    fn from(s: String) -> Self {
        Verb::from(s.as_str())
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Other(name) => name.0,
            known => known.as_str().to_string(),
        }
    }
}
