//! Hypermedia links that carry affordances.
//!
//! A [`Link`] owns its affordances. This crate only appends to that list and
//! reads it back; building hrefs or expanding URI templates happens elsewhere.

use serde::Serialize;

use crate::affordance::Affordance;

/// A link relation pointing at a resource, plus the affordances advertised on
/// it in attachment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: String,
    pub href: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    affordances: Vec<Affordance>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            affordances: Vec::new(),
        }
    }

    /// Append an affordance, returning the link.
    pub fn with_affordance(mut self, affordance: Affordance) -> Self {
        self.affordances.push(affordance);
        self
    }

    pub fn with_affordances(mut self, affordances: impl IntoIterator<Item = Affordance>) -> Self {
        self.affordances.extend(affordances);
        self
    }

    pub fn add_affordance(&mut self, affordance: Affordance) {
        self.affordances.push(affordance);
    }

    pub fn affordances(&self) -> &[Affordance] {
        &self.affordances
    }
}

/// The affordances `link` already owns, in the order they were attached.
///
/// Performs no computation and no filtering.
pub fn affordances_by_link(link: &Link) -> &[Affordance] {
    link.affordances()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affordance::build_affordance;
    use crate::operation::Operation;
    use crate::schema::SchemaRegistry;
    use crate::verb::Verb;

    fn affordance(name: &str, verb: Verb) -> Affordance {
        build_affordance(&Operation::new(name, verb), &SchemaRegistry::new()).unwrap()
    }

    #[test]
    fn new_link_has_no_affordances() {
        let link = Link::new("self", "/employees/1");
        assert!(affordances_by_link(&link).is_empty());
    }

    #[test]
    fn returns_affordances_in_attachment_order() {
        let mut link = Link::new("self", "/employees/1")
            .with_affordance(affordance("update", Verb::Put))
            .with_affordance(affordance("patch", Verb::Patch));
        link.add_affordance(affordance("remove", Verb::Delete));

        let names: Vec<&str> = affordances_by_link(&link)
            .iter()
            .map(Affordance::operation_name)
            .collect();
        assert_eq!(names, vec!["update", "patch", "remove"]);
        assert_eq!(Affordance::by_link(&link), link.affordances());
    }

    #[test]
    fn duplicates_are_kept() {
        let a = affordance("update", Verb::Put);
        let link = Link::new("self", "/x").with_affordances([a.clone(), a]);
        assert_eq!(affordances_by_link(&link).len(), 2);
    }
}
