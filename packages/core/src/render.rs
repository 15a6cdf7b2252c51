//! Plain-text rendering of affordances and links.
//!
//! The output is stable and meant for terminals and logs. It is not a wire
//! format; hypermedia serialisation belongs to the layer that consumes
//! [`Affordance`] values.

use crate::affordance::Affordance;
use crate::link::Link;

/// Render one affordance.
///
/// ```text
/// POST createEmployee  (input required)
///   age: integer
///   name: string
/// ```
///
/// An affordance without properties renders as the header line only.
pub fn render_affordance(affordance: &Affordance) -> String {
    let mut out = String::new();
    out.push_str(affordance.verb_str());
    out.push(' ');
    out.push_str(affordance.operation_name());
    if affordance.is_required() {
        out.push_str("  (input required)");
    }
    out.push('\n');

    for (name, value_type) in affordance.properties() {
        out.push_str(&format!("  {name}: {value_type}\n"));
    }
    out
}

/// Render a link and every affordance attached to it, indented beneath it.
///
/// ```text
/// self -> /employees/1
///   PUT updateEmployee  (input required)
///     name: string
///   DELETE deleteEmployee
/// ```
pub fn render_link(link: &Link) -> String {
    let mut out = format!("{} -> {}\n", link.rel, link.href);
    if link.affordances().is_empty() {
        out.push_str("  (no affordances)\n");
    }
    for affordance in link.affordances() {
        for line in render_affordance(affordance).lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
