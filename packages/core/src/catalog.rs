//! JSON catalogs of types, operations and links.
//!
//! A catalog is how hand-declared or generated schemas reach the engine
//! without a Rust type per schema:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "Person", "properties": [
//!         { "name": "name", "type": "string" },
//!         { "name": "age",  "type": "integer" } ] }
//!   ],
//!   "operations": [
//!     { "name": "createPerson", "verb": "POST",
//!       "parameters": [ { "name": "person", "type": "Person", "role": "body" } ] }
//!   ],
//!   "links": [
//!     { "rel": "people", "href": "/people", "operations": ["createPerson"] }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::affordance::{Affordance, AffordanceBuilder};
use crate::link::Link;
use crate::operation::Operation;
use crate::schema::{SchemaError, SchemaRegistry};
use crate::types::TypeSchema;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("link {rel:?} refers to unknown operation {operation:?}")]
    UnknownOperation { rel: String, operation: String },
}

/// A link declaration: which operations' affordances it advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub rel: String,
    pub href: String,

    /// Operation names, in the order their affordances are attached.
    #[serde(default)]
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub types: Vec<TypeSchema>,

    #[serde(default)]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkSpec>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// A registry holding every declared type. Later duplicates replace
    /// earlier ones.
    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::from_schemas(self.types.iter().cloned())
    }

    /// Build the affordance of every operation, in declaration order.
    pub fn build_all(&self, builder: &AffordanceBuilder<'_>) -> Result<Vec<Affordance>, SchemaError> {
        self.operations.iter().map(|op| builder.build(op)).collect()
    }

    /// Materialise the declared links, attaching each named operation's
    /// affordance in the listed order.
    pub fn links(&self, builder: &AffordanceBuilder<'_>) -> Result<Vec<Link>, CatalogError> {
        let by_name: HashMap<&str, &Operation> = self
            .operations
            .iter()
            .map(|op| (op.name.as_str(), op))
            .collect();

        let mut links = Vec::with_capacity(self.links.len());
        for declared in &self.links {
            let mut link = Link::new(&declared.rel, &declared.href);
            for name in &declared.operations {
                let op = by_name.get(name.as_str()).ok_or_else(|| {
                    CatalogError::UnknownOperation {
                        rel: declared.rel.clone(),
                        operation: name.clone(),
                    }
                })?;
                link.add_affordance(builder.build(op)?);
            }
            links.push(link);
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::affordances_by_link;
    use crate::observe::NoopObserver;
    use crate::verb::Verb;

    const CATALOG: &str = r#"{
        "types": [
            { "name": "Person", "properties": [
                { "name": "class", "type": "string" },
                { "name": "name", "type": "string" },
                { "name": "age", "type": "integer" } ] }
        ],
        "operations": [
            { "name": "listPeople", "verb": "GET" },
            { "name": "createPerson", "verb": "POST",
              "parameters": [ { "name": "person", "type": "Person", "role": "body" } ] }
        ],
        "links": [
            { "rel": "people", "href": "/people", "operations": ["createPerson", "listPeople"] }
        ]
    }"#;

    #[test]
    fn parses_and_builds_all() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let registry = catalog.registry();
        let builder = AffordanceBuilder::new(&registry).with_observer(&NoopObserver);
        let all = catalog.build_all(&builder).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(*all[0].verb(), Verb::Get);
        assert!(all[0].properties().is_empty());
        assert_eq!(all[1].properties().len(), 2);
    }

    #[test]
    fn links_attach_in_listed_order() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let registry = catalog.registry();
        let builder = AffordanceBuilder::new(&registry).with_observer(&NoopObserver);
        let links = catalog.links(&builder).unwrap();
        assert_eq!(links.len(), 1);
        let names: Vec<&str> = affordances_by_link(&links[0])
            .iter()
            .map(Affordance::operation_name)
            .collect();
        assert_eq!(names, vec!["createPerson", "listPeople"]);
    }

    #[test]
    fn unknown_operation_in_link() {
        let mut catalog = Catalog::from_json(CATALOG).unwrap();
        catalog.links[0].operations.push("deletePerson".into());
        let registry = catalog.registry();
        let builder = AffordanceBuilder::new(&registry);
        let err = catalog.links(&builder).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownOperation { ref operation, .. } if operation == "deletePerson"
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Catalog::from_json(r#"{ "types": [ { "name": 3 } ] }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn empty_object_is_empty_catalog() {
        assert_eq!(Catalog::from_json("{}").unwrap(), Catalog::default());
    }
}
