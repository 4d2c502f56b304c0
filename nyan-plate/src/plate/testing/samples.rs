//! Curated template samples
//!
//! Samples are numbered pairs in `nyan-plate/samples/`: `NN-name.html` holds the template,
//! `NN-name.json` the context it is rendered against.

use crate::plate::context::{Context, ContextError};
use crate::plate::extraction::extract;
use crate::plate::rendering::render;
use std::fs;
use std::path::PathBuf;

/// Errors that can occur when loading samples
#[derive(Debug, Clone)]
pub enum SampleError {
    NotFound(String),
    IoError(String),
    ContextError(ContextError),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::NotFound(msg) => write!(f, "Sample not found: {}", msg),
            SampleError::IoError(msg) => write!(f, "IO error: {}", msg),
            SampleError::ContextError(err) => write!(f, "Context error: {}", err),
        }
    }
}

impl std::error::Error for SampleError {}

impl From<std::io::Error> for SampleError {
    fn from(err: std::io::Error) -> Self {
        SampleError::IoError(err.to_string())
    }
}

impl From<ContextError> for SampleError {
    fn from(err: ContextError) -> Self {
        SampleError::ContextError(err)
    }
}

/// A template together with the context it renders against
#[derive(Debug, Clone)]
pub struct Sample {
    pub number: usize,
    pub name: String,
    pub template: String,
    pub context: Context,
}

impl Sample {
    pub fn render(&self) -> String {
        render(&self.context, &self.template)
    }

    /// Context extracted back out of the rendered template
    pub fn round_trip(&self) -> Context {
        extract(&self.render())
    }
}

/// Access to the curated samples
pub struct PlateSamples;

impl PlateSamples {
    pub fn dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples")
    }

    /// Stems of all samples (`01-greeting`, ...), in number order
    pub fn list() -> Result<Vec<String>, SampleError> {
        let mut stems: Vec<String> = fs::read_dir(Self::dir())?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(".html").map(str::to_string)
            })
            .filter(|stem| Self::number_of(stem).is_some())
            .collect();
        stems.sort();
        Ok(stems)
    }

    fn number_of(stem: &str) -> Option<usize> {
        let (number, _) = stem.split_once('-')?;
        number.parse().ok()
    }

    /// Load a sample by number
    pub fn get(number: usize) -> Result<Sample, SampleError> {
        let stem = Self::list()?
            .into_iter()
            .find(|stem| Self::number_of(stem) == Some(number))
            .ok_or_else(|| SampleError::NotFound(format!("{:02}-*.html", number)))?;
        Self::load(number, stem)
    }

    /// Load every sample
    pub fn all() -> Result<Vec<Sample>, SampleError> {
        Self::list()?
            .into_iter()
            .map(|stem| {
                let number = Self::number_of(&stem).unwrap_or_default();
                Self::load(number, stem)
            })
            .collect()
    }

    fn load(number: usize, stem: String) -> Result<Sample, SampleError> {
        let dir = Self::dir();
        let template = fs::read_to_string(dir.join(format!("{}.html", stem)))?;
        let context_path = dir.join(format!("{}.json", stem));
        let context = if context_path.exists() {
            Context::from_json_str(&fs::read_to_string(context_path)?)?
        } else {
            Context::new()
        };
        let name = stem
            .split_once('-')
            .map(|(_, name)| name.to_string())
            .unwrap_or_default();

        Ok(Sample {
            number,
            name,
            template,
            context,
        })
    }
}
