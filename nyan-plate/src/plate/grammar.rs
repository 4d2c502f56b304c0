//! Directive grammar
//!
//!     The vocabulary of `data-nyan*` attributes, written once as data. Every directive kind
//!     maps to a [Binding] that says what the bound context value drives: element content, a
//!     repeated body, a nested scope, a literal attribute, or a bare boolean attribute.
//!
//!     Both engines read the same table. Rendering looks directives up by their directive
//!     attribute (`data-nyanClass`) and writes the done marker (`data-nyanDoneClass`);
//!     extraction looks them up by marker and reads the target attribute back.
//!
//!     Directive            Binding                 Marker
//!         data-nyanString      content                 data-nyanDoneString
//!         data-nyanLoop        loop                    data-nyanDoneLoop
//!         data-nyanHtml        scope (nested record)   data-nyanDoneHtml
//!         data-nyanClass       attribute `class`       data-nyanDoneClass
//!         data-nyanChecked     boolean `checked`       data-nyanDoneChecked
//!         ...
//!
//!     The table is immutable once built. [DIRECTIVES] holds the standard table for the
//!     whole process; engines take a `&DirectiveTable` so tests can inject their own.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Prefix shared by every directive attribute
pub const DIRECTIVE_PREFIX: &str = "data-nyan";

/// Prefix shared by every done marker attribute
pub const MARKER_PREFIX: &str = "data-nyanDone";

/// Directive keys are plain identifiers
static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").unwrap());

/// The standard directive table, built on first use
pub static DIRECTIVES: Lazy<DirectiveTable> = Lazy::new(DirectiveTable::standard);

/// Check whether `key` is a usable context key (`\w+`)
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Every directive kind the grammar knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectiveKind {
    Content,
    Loop,
    Html,
    Class,
    Style,
    Href,
    Id,
    Checked,
    Selected,
    Disabled,
    Value,
    Name,
    Src,
    Alt,
    For,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 15] = [
        DirectiveKind::Content,
        DirectiveKind::Loop,
        DirectiveKind::Html,
        DirectiveKind::Class,
        DirectiveKind::Style,
        DirectiveKind::Href,
        DirectiveKind::Id,
        DirectiveKind::Checked,
        DirectiveKind::Selected,
        DirectiveKind::Disabled,
        DirectiveKind::Value,
        DirectiveKind::Name,
        DirectiveKind::Src,
        DirectiveKind::Alt,
        DirectiveKind::For,
    ];

    /// Name as spelled after the prefix (`data-nyan<name>`)
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Content => "String",
            DirectiveKind::Loop => "Loop",
            DirectiveKind::Html => "Html",
            DirectiveKind::Class => "Class",
            DirectiveKind::Style => "Style",
            DirectiveKind::Href => "Href",
            DirectiveKind::Id => "Id",
            DirectiveKind::Checked => "Checked",
            DirectiveKind::Selected => "Selected",
            DirectiveKind::Disabled => "Disabled",
            DirectiveKind::Value => "Value",
            DirectiveKind::Name => "Name",
            DirectiveKind::Src => "Src",
            DirectiveKind::Alt => "Alt",
            DirectiveKind::For => "For",
        }
    }

    pub fn binding(self) -> Binding {
        match self {
            DirectiveKind::Content => Binding::Content,
            DirectiveKind::Loop => Binding::Loop,
            DirectiveKind::Html => Binding::Scope,
            DirectiveKind::Class => Binding::Attribute("class"),
            DirectiveKind::Style => Binding::Attribute("style"),
            DirectiveKind::Href => Binding::Attribute("href"),
            DirectiveKind::Id => Binding::Attribute("id"),
            DirectiveKind::Value => Binding::Attribute("value"),
            DirectiveKind::Name => Binding::Attribute("name"),
            DirectiveKind::Src => Binding::Attribute("src"),
            DirectiveKind::Alt => Binding::Attribute("alt"),
            DirectiveKind::For => Binding::Attribute("for"),
            DirectiveKind::Checked => Binding::Boolean("checked"),
            DirectiveKind::Selected => Binding::Boolean("selected"),
            DirectiveKind::Disabled => Binding::Boolean("disabled"),
        }
    }

    /// Marker spellings written by older renderers, still accepted on extraction
    fn aliases(self) -> &'static [&'static str] {
        match self {
            DirectiveKind::Content => &["data-nyanDoneNyanString"],
            // An unexpanded loop keeps its raw directive, which still delimits the records
            DirectiveKind::Loop => &["data-nyanLoop"],
            DirectiveKind::Html => &["data-nyanDoneNyanHtml"],
            _ => &[],
        }
    }
}

/// What a bound context value drives on its host element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The element's content is replaced by the bound scalar
    Content,
    /// The element's body repeats once per record of the bound list
    Loop,
    /// The element's body renders against the bound nested record
    Scope,
    /// The bound scalar becomes the value of the named attribute
    Attribute(&'static str),
    /// The named attribute is emitted bare when the bound value is truthy
    Boolean(&'static str),
}

impl Binding {
    /// Loop and scope bindings change the context their body renders against
    pub fn is_container(self) -> bool {
        matches!(self, Binding::Loop | Binding::Scope)
    }

    /// The literal markup attribute this binding writes, if any
    pub fn target_attribute(self) -> Option<&'static str> {
        match self {
            Binding::Attribute(name) | Binding::Boolean(name) => Some(name),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Binding::Content => "content",
            Binding::Loop => "loop",
            Binding::Scope => "scope",
            Binding::Attribute(_) => "attribute",
            Binding::Boolean(_) => "boolean",
        }
    }
}

/// One row of the directive table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub binding: Binding,
    /// Attribute that triggers the directive in a template (`data-nyanClass`)
    pub attribute: String,
    /// Attribute left behind once the directive is consumed (`data-nyanDoneClass`)
    pub marker: String,
    /// Additional marker spellings accepted on extraction
    pub aliases: &'static [&'static str],
}

impl Directive {
    fn new(kind: DirectiveKind) -> Self {
        Directive {
            kind,
            binding: kind.binding(),
            attribute: format!("{}{}", DIRECTIVE_PREFIX, kind.name()),
            marker: format!("{}{}", MARKER_PREFIX, kind.name()),
            aliases: kind.aliases(),
        }
    }

    /// The done marker attribute for `key`, ready to splice into a tag
    pub fn marker_for(&self, key: &str) -> String {
        format!("{}=\"{}\"", self.marker, key)
    }
}

/// Immutable lookup table over all directives
#[derive(Debug, Clone)]
pub struct DirectiveTable {
    directives: Vec<Directive>,
    by_attribute: HashMap<String, usize>,
    by_marker: HashMap<String, usize>,
}

impl DirectiveTable {
    /// Build a table from a set of directive kinds
    pub fn from_kinds(kinds: &[DirectiveKind]) -> Self {
        let directives: Vec<Directive> = kinds.iter().copied().map(Directive::new).collect();
        let mut by_attribute = HashMap::new();
        let mut by_marker = HashMap::new();

        for (index, directive) in directives.iter().enumerate() {
            by_attribute.insert(directive.attribute.clone(), index);
            by_marker.insert(directive.marker.clone(), index);
            for alias in directive.aliases {
                by_marker.insert((*alias).to_string(), index);
            }
        }

        DirectiveTable {
            directives,
            by_attribute,
            by_marker,
        }
    }

    /// The full grammar
    pub fn standard() -> Self {
        Self::from_kinds(&DirectiveKind::ALL)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn get(&self, kind: DirectiveKind) -> Option<&Directive> {
        self.directives.iter().find(|d| d.kind == kind)
    }

    /// Look a directive up by its template attribute (`data-nyanClass`)
    pub fn by_attribute(&self, attribute: &str) -> Option<&Directive> {
        self.by_attribute
            .get(attribute)
            .map(|&index| &self.directives[index])
    }

    /// Look a directive up by one of its marker spellings (`data-nyanDoneClass`)
    pub fn by_marker(&self, attribute: &str) -> Option<&Directive> {
        self.by_marker
            .get(attribute)
            .map(|&index| &self.directives[index])
    }
}

impl Default for DirectiveTable {
    fn default() -> Self {
        Self::standard()
    }
}
