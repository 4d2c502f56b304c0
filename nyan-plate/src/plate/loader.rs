//! Template loading utilities
//!
//! This module provides `TemplateLoader`, which loads markup from files or strings and runs
//! either direction on it, and the `TemplateSource` seam hosts use to supply a default
//! template when a render request names none.
//!
//! # Example
//!
//! ```rust,ignore
//! use nyan_plate::plate::loader::{FileSource, TemplateLoader};
//!
//! // From file
//! let markup = TemplateLoader::from_path("page.html")?.render(&context);
//!
//! // From string
//! let context = TemplateLoader::from_string(markup).extract();
//!
//! // Falling back to a default template
//! let fallback = FileSource::new("default.html");
//! let markup = TemplateLoader::render_or_default(&context, None, &fallback)?;
//! ```

use super::context::Context;
use super::extraction::extract;
use super::lexing::{tokenize_with_spans, Spanned};
use super::parsing::{parse, Element};
use super::rendering::render;
use std::fs;
use std::path::{Path, PathBuf};

/// Error that can occur when loading templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// IO error when reading a file
    IoError(String),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// Where a template comes from when the caller does not pass one
pub trait TemplateSource {
    fn load(&self) -> Result<String, LoaderError>;
}

/// A template held in memory
#[derive(Debug, Clone)]
pub struct InlineSource(pub String);

impl TemplateSource for InlineSource {
    fn load(&self) -> Result<String, LoaderError> {
        Ok(self.0.clone())
    }
}

/// A template read from disk on every load
#[derive(Debug, Clone)]
pub struct FileSource(PathBuf);

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileSource(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl TemplateSource for FileSource {
    fn load(&self) -> Result<String, LoaderError> {
        fs::read_to_string(&self.0).map_err(|err| {
            LoaderError::IoError(format!("{}: {}", self.0.display(), err))
        })
    }
}

/// Markup loader with shortcuts for both directions
pub struct TemplateLoader {
    source: String,
}

impl TemplateLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(TemplateLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        TemplateLoader {
            source: source.into(),
        }
    }

    /// Load whatever a template source provides
    pub fn from_source(source: &dyn TemplateSource) -> Result<Self, LoaderError> {
        Ok(TemplateLoader {
            source: source.load()?,
        })
    }

    /// Render the loaded markup as a template
    pub fn render(&self, context: &Context) -> String {
        render(context, &self.source)
    }

    /// Extract a context from the loaded markup
    pub fn extract(&self) -> Context {
        extract(&self.source)
    }

    pub fn tokens(&self) -> Vec<Spanned> {
        tokenize_with_spans(&self.source)
    }

    pub fn tree(&self) -> Element {
        parse(&self.source)
    }

    /// Render `template`, or the template `fallback` supplies when there is none
    pub fn render_or_default(
        context: &Context,
        template: Option<&str>,
        fallback: &dyn TemplateSource,
    ) -> Result<String, LoaderError> {
        match template {
            Some(template) => Ok(render(context, template)),
            None => Ok(Self::from_source(fallback)?.render(context)),
        }
    }

    /// Get the raw source string
    pub fn source(&self) -> String {
        self.source.clone()
    }

    /// Get a reference to the raw source string
    pub fn source_ref(&self) -> &str {
        &self.source
    }
}

impl TemplateSource for TemplateLoader {
    fn load(&self) -> Result<String, LoaderError> {
        Ok(self.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::testing::samples_path;

    #[test]
    fn test_from_string() {
        let loader = TemplateLoader::from_string("<p>Hello</p>");
        assert_eq!(loader.source(), "<p>Hello</p>");
        assert_eq!(loader.tokens().len(), 3);
        assert_eq!(loader.tree().child_elements().count(), 1);
    }

    #[test]
    fn test_from_path() {
        let loader = TemplateLoader::from_path(samples_path("01-greeting.html")).unwrap();
        assert!(loader.source_ref().contains("data-nyanString"));
    }

    #[test]
    fn test_from_path_nonexistent() {
        let result = TemplateLoader::from_path("nonexistent.html");
        assert!(matches!(result, Err(LoaderError::IoError(_))));
    }

    #[test]
    fn test_render_and_extract() {
        let context = Context::new().with("name", "Mochi");
        let rendered = TemplateLoader::from_string(r#"<b data-nyanString="name">?</b>"#).render(&context);
        assert_eq!(TemplateLoader::from_string(rendered).extract(), context);
    }

    #[test]
    fn test_render_or_default() {
        let context = Context::new().with("name", "Mochi");
        let fallback = InlineSource(r#"<i data-nyanString="name"></i>"#.to_string());

        let explicit = TemplateLoader::render_or_default(
            &context,
            Some(r#"<b data-nyanString="name"></b>"#),
            &fallback,
        )
        .unwrap();
        assert_eq!(explicit, r#"<b data-nyanDoneString="name">Mochi</b>"#);

        let defaulted = TemplateLoader::render_or_default(&context, None, &fallback).unwrap();
        assert_eq!(defaulted, r#"<i data-nyanDoneString="name">Mochi</i>"#);
    }

    #[test]
    fn test_missing_default_file() {
        let fallback = FileSource::new("no/such/template.html");
        let result = TemplateLoader::render_or_default(&Context::new(), None, &fallback);
        assert!(matches!(result, Err(LoaderError::IoError(msg)) if msg.contains("no/such/template.html")));
    }
}
