//! Context reconstruction
//!
//!     Extraction reads the done markers left by rendering and rebuilds the context that
//!     produced them. It runs over the parse tree from [super::parsing], bottom-up: every
//!     element yields a record, and a parent folds its children's records into its own.
//!
//!     Per element:
//!
//!         content marker      key -> the element's text content
//!         attribute marker    key -> the literal attribute value, or "" if it is gone
//!         boolean marker      key -> true if the literal attribute is present, else ""
//!         loop marker         key -> one record per child element, in order
//!         scope marker        key -> the children's records merged into one
//!
//!     Markers on one element apply content first, then attributes, then booleans, then the
//!     container. Elements without a container marker merge their children's records into
//!     their own. Later writes win, so for a repeated key the binding furthest along in
//!     document order is the one kept.
//!
//!     A boolean that rendered as `false` leaves no literal attribute and comes back as the
//!     empty string. The markup holds no trace of the difference between `false` and absent.

use super::context::{Context, Value};
use super::grammar::{is_valid_key, Binding, DirectiveTable, DIRECTIVES};
use super::parsing::{parse, AttributeValue, Element};

/// Extract a context from rendered markup with the standard directive table
pub fn extract(markup: &str) -> Context {
    Extractor::new(&DIRECTIVES).extract(markup)
}

/// Context extractor over a directive table
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'t> {
    table: &'t DirectiveTable,
}

impl<'t> Extractor<'t> {
    pub fn new(table: &'t DirectiveTable) -> Self {
        Extractor { table }
    }

    pub fn extract(&self, markup: &str) -> Context {
        self.extract_tree(&parse(markup))
    }

    /// Reconstruct the context bound under an already parsed element
    pub fn extract_tree(&self, root: &Element) -> Context {
        self.reconstruct(root)
    }

    fn reconstruct(&self, element: &Element) -> Context {
        let mut record = Context::new();
        let mut container: Option<(Binding, &str)> = None;

        let mut bindings: Vec<(Binding, &str)> = element
            .attributes
            .iter()
            .filter_map(|(name, value)| {
                let directive = self.table.by_marker(name)?;
                let key = value.as_text().filter(|key| is_valid_key(key))?;
                Some((directive.binding, key))
            })
            .collect();
        bindings.sort_by_key(|(binding, _)| precedence(*binding));

        for (binding, key) in bindings {
            match binding {
                Binding::Content => {
                    record.insert(key, element.text_content());
                }
                Binding::Attribute(attribute) => {
                    let literal = element
                        .attr(attribute)
                        .and_then(AttributeValue::as_text)
                        .unwrap_or_default();
                    record.insert(key, literal);
                }
                Binding::Boolean(attribute) => {
                    let value = if element.has_attr(attribute) {
                        Value::Bool(true)
                    } else {
                        Value::Text(String::new())
                    };
                    record.insert(key, value);
                }
                binding @ (Binding::Loop | Binding::Scope) => {
                    if container.is_none() {
                        container = Some((binding, key));
                    }
                }
            }
        }

        match container {
            Some((Binding::Loop, key)) => {
                let items: Vec<Context> = element
                    .child_elements()
                    .map(|child| self.reconstruct(child))
                    .collect();
                record.insert(key, items);
            }
            Some((_, key)) => {
                let mut nested = Context::new();
                for child in element.child_elements() {
                    nested.merge(self.reconstruct(child));
                }
                record.insert(key, nested);
            }
            None => {
                for child in element.child_elements() {
                    record.merge(self.reconstruct(child));
                }
            }
        }

        record
    }
}

/// Order in which one element's markers are applied; later ones win a shared key
fn precedence(binding: Binding) -> u8 {
    match binding {
        Binding::Content => 0,
        Binding::Attribute(_) => 1,
        Binding::Boolean(_) => 2,
        Binding::Loop | Binding::Scope => 3,
    }
}
