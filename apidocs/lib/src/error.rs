//! Error types for the documentation generator.
//!
//! The hierarchy mirrors the build pipeline:
//! - [`CatalogError`] - reading, parsing or validating the API catalog
//! - [`RenderError`] - turning a valid catalog into HTML fragments
//! - [`BuildError`] - one complete build pass (wraps the two above)
//! - [`DriverError`] - the long-running watch/serve driver (build failures
//!   there are logged, never returned)

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the API catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid YAML or does not match the expected shape.
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The catalog is not valid JSON or does not match the expected shape.
    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint's `output` references a type missing from `types`.
    #[error("endpoint `{path}` references unknown type `{type_name}` for status {status}")]
    UnknownType {
        path: String,
        status: u16,
        type_name: String,
    },

    /// Two endpoints share the same path.
    #[error("duplicate endpoint path `{0}`")]
    DuplicatePath(String),
}

/// Errors raised while rendering HTML fragments.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The status code has no standard reason phrase.
    #[error("endpoint `{path}` lists status {status}, which has no standard reason phrase")]
    UnknownStatus { path: String, status: u16 },

    /// A status entry survived validation without a registered type.
    #[error("endpoint `{path}` references unknown type `{type_name}`")]
    MissingType { path: String, type_name: String },
}

/// Errors raised by a single build pass.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The HTML shell template is missing or unreadable.
    #[error("failed to read template {path:?}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loading the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Rendering the catalog failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Creating the output directory failed.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the assets directory failed.
    #[error("failed to walk assets directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Copying a static asset failed.
    #[error("failed to copy {from:?} to {to:?}: {source}")]
    CopyAsset {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the final HTML file failed.
    #[error("failed to write {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the watch/serve driver itself (not by rebuilds).
#[derive(Debug, Error)]
pub enum DriverError {
    /// The file watcher could not be created or attached.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Binding or running the preview server failed.
    #[error("preview server error: {0}")]
    Serve(#[from] std::io::Error),

    /// The preview server task panicked or was cancelled.
    #[error("preview server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
