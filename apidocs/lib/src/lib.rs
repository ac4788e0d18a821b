//! Static documentation pages for web APIs.
//!
//! An author describes an API in a catalog file (endpoints, parameters,
//! headers, status codes and example bodies). This library renders that
//! catalog into an HTML shell template, copies the site's static assets
//! next to it, and can keep the output fresh while files change.
//!
//! ## Pipeline
//!
//! - [`Catalog`] - loads and validates the catalog file (YAML or JSON)
//! - [`render`] - turns a catalog into header and endpoint fragments
//! - [`ShellTemplate`] - substitutes the fragments into the page shell
//! - [`build()`] - one full pass: load, render, copy assets, write `index.html`
//!
//! ## Driver
//!
//! - [`run_watch`] - rebuild whenever the watched tree changes
//! - [`run_serve`] - rebuild on change and serve the output over HTTP
//!
//! ## Examples
//!
//! ```no_run
//! use apidocs_lib::{SiteConfig, build};
//!
//! let report = build(&SiteConfig::new()).unwrap();
//! println!("wrote {} endpoints to {}", report.endpoints, report.output.display());
//! ```

pub mod build;
pub mod catalog;
pub mod config;
mod error;
pub mod markdown;
pub mod render;
pub mod serve;
pub mod status;
pub mod template;
pub mod watch;

pub use build::{BuildReport, build};
pub use catalog::{
    ApiDescription, ApiInfo, Catalog, CatalogFormat, EndpointDescriptor, Example, Extra,
    HttpMethod, OrderedMap, Parameter, TypeRegistry,
};
pub use config::SiteConfig;
pub use error::{BuildError, CatalogError, DriverError, RenderError};
pub use render::RenderedPage;
pub use serve::run_serve;
pub use template::ShellTemplate;
pub use watch::{ChangeFilter, WatchStats, WatchTarget, run_watch};
