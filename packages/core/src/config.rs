//! Inference configuration, populated from environment variables.

use serde::{Deserialize, Serialize};

/// Property name excluded from every introspected type by default.
pub const DEFAULT_META_PROPERTY: &str = "class";

/// How to resolve two property sources that declare the same name with
/// different types (e.g. a supertype and the type itself).
///
/// Identical redeclarations (same name, same type) are always merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Fail introspection with
    /// [`SchemaError::ConflictingProperty`](crate::schema::SchemaError::ConflictingProperty).
    #[default]
    Reject,
    /// The first source encountered wins.
    KeepFirst,
    /// The last source encountered wins.
    KeepLast,
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictPolicy::Reject => write!(f, "reject"),
            ConflictPolicy::KeepFirst => write!(f, "keep-first"),
            ConflictPolicy::KeepLast => write!(f, "keep-last"),
        }
    }
}

/// Parses a [`ConflictPolicy`] from its kebab-case string.
///
/// Returns `Err` with a descriptive message if the string is not recognised.
impl std::str::FromStr for ConflictPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(ConflictPolicy::Reject),
            "keep-first" => Ok(ConflictPolicy::KeepFirst),
            "keep-last" => Ok(ConflictPolicy::KeepLast),
            _ => Err(format!(
                "unknown conflict policy {s:?}; expected one of: reject, keep-first, keep-last"
            )),
        }
    }
}

/// Knobs for the property introspector.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `AFFORDANCE_META_PROPERTY` | `class` | Property name never reported as input |
/// | `AFFORDANCE_CONFLICT_POLICY` | `reject` | `reject`, `keep-first` or `keep-last` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// The implicit type-handle property every object exposes.
    pub meta_property: String,

    pub conflict_policy: ConflictPolicy,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            meta_property: DEFAULT_META_PROPERTY.to_string(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl InferenceConfig {
    /// Populate config from environment variables, applying defaults where
    /// absent. An unparseable policy falls back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let meta_property = lookup("AFFORDANCE_META_PROPERTY")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_META_PROPERTY.into());

        let conflict_policy = match lookup("AFFORDANCE_CONFLICT_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(%raw, "AFFORDANCE_CONFLICT_POLICY: {e}; using default");
                ConflictPolicy::default()
            }),
            None => ConflictPolicy::default(),
        };

        Self {
            meta_property,
            conflict_policy,
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_meta_property(mut self, name: impl Into<String>) -> Self {
        self.meta_property = name.into();
        self
    }
}
