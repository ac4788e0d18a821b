//! The endpoint catalog: what the generated page documents.
//!
//! A catalog is a single author-edited file (YAML by default, JSON when the
//! extension says so) holding the API description and the registry of
//! named output types:
//!
//! ```yaml
//! info:
//!   title: Example API
//!   description: Talks to **example.org**.
//! types:
//!   Pong: pong
//! endpoints:
//!   - path: /ping
//!     methods: [GET]
//!     description: Ping.
//!     tags: []
//!     output:
//!       200: Pong
//! ```
//!
//! [`Catalog::load`] is the reload step: every call re-reads and re-parses
//! the file into a fresh, validated, immutable value.

mod method;
mod ordered;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

pub use method::HttpMethod;
pub use ordered::OrderedMap;

/// Title and introduction shown at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    /// Markdown.
    #[serde(default)]
    pub description: String,
}

/// One documented request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A callout block attached to an endpoint (`info`, `warning`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Extra {
    /// Used as the block's CSS class.
    #[serde(alias = "type")]
    pub kind: String,
    /// Single-line markdown.
    #[serde(alias = "data")]
    pub body: String,
}

/// A code sample shown in a collapsible block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Example {
    pub language: String,
    pub code: String,
}

/// One documented API route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndpointDescriptor {
    /// Route, possibly with `:name` parameters. Unique within a catalog.
    pub path: String,
    pub methods: Vec<HttpMethod>,
    #[serde(default)]
    pub headers: Option<OrderedMap<String>>,
    #[serde(default)]
    pub parameters: Option<OrderedMap<Parameter>>,
    /// Markdown.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Option<Vec<Example>>,
    /// Status code to type name in the [`TypeRegistry`].
    #[serde(default)]
    pub output: Option<BTreeMap<u16, String>>,
}

/// The API being documented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDescription {
    pub info: ApiInfo,
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Named literal bodies referenced from endpoint outputs.
///
/// Values are display text (usually JSON-like) and are never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TypeRegistry(BTreeMap<String, String>);

impl TypeRegistry {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl CatalogFormat {
    /// Picks the format from the file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// On-disk shape; split into description and registry after parsing.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    info: ApiInfo,
    #[serde(default)]
    types: TypeRegistry,
    #[serde(default)]
    endpoints: Vec<EndpointDescriptor>,
}

/// A validated snapshot of the catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub api: ApiDescription,
    pub types: TypeRegistry,
}

impl Catalog {
    /// Builds a catalog from parts and validates it.
    ///
    /// ## Errors
    ///
    /// Returns [`CatalogError::UnknownType`] for an output referencing a
    /// type missing from `types`, and [`CatalogError::DuplicatePath`] when
    /// two endpoints share a path.
    pub fn new(api: ApiDescription, types: TypeRegistry) -> Result<Self, CatalogError> {
        let catalog = Self { api, types };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates the catalog at `path`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        debug!(path = %path.display(), "loading catalog");
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, CatalogFormat::from_path(path))
    }

    /// Parses and validates catalog text.
    ///
    /// ## Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn parse(content: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        let file: CatalogFile = match format {
            CatalogFormat::Yaml => serde_yaml::from_str(content)?,
            CatalogFormat::Json => serde_json::from_str(content)?,
        };
        let api = ApiDescription {
            info: file.info,
            endpoints: file.endpoints,
        };
        Self::new(api, file.types)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for endpoint in &self.api.endpoints {
            if !seen.insert(endpoint.path.as_str()) {
                return Err(CatalogError::DuplicatePath(endpoint.path.clone()));
            }
            for (status, type_name) in endpoint.output.iter().flatten() {
                if !self.types.contains(type_name) {
                    return Err(CatalogError::UnknownType {
                        path: endpoint.path.clone(),
                        status: *status,
                        type_name: type_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
