//! # apidocs
//!
//! Builds a single-page HTML reference for a web API from a catalog file.
//!
//! ## Usage
//!
//! ```bash
//! # Build once into ./dist from ./api.yaml and ./src
//! apidocs
//!
//! # Rebuild whenever anything under the working directory changes
//! apidocs --watch
//!
//! # Rebuild on change and preview at http://localhost:3000
//! apidocs --serve
//! apidocs --serve --port 8080
//!
//! # Non-default layout
//! apidocs --src site/assets --catalog site/api.json --out public
//!
//! # Verbose output for debugging
//! apidocs -v      # DEBUG for apidocs
//! apidocs -vv     # TRACE for apidocs
//! ```
//!
//! The assets directory must contain an `index.html` shell with the
//! `{{ title }}`, `{{ header }}` and `{{ endpoints }}` markers.

use std::path::PathBuf;

use apidocs_lib::SiteConfig;
use apidocs_lib::config::DEFAULT_PORT;
use clap::Parser;

/// Command-line interface for the API documentation builder.
#[derive(Debug, Parser)]
#[command(name = "apidocs", version)]
#[command(about = "Build a static HTML reference page for a web API")]
pub struct Cli {
    /// Rebuild whenever a file under the working directory changes
    #[arg(long, conflicts_with = "serve")]
    pub watch: bool,

    /// Rebuild on change and serve the output directory over HTTP
    #[arg(long)]
    pub serve: bool,

    /// Port for --serve
    #[arg(long, default_value_t = DEFAULT_PORT, requires = "serve")]
    pub port: u16,

    /// Static assets directory; must contain the index.html shell template
    #[arg(long, value_name = "DIR", default_value = "src")]
    pub src: PathBuf,

    /// API catalog file (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE", default_value = "api.yaml")]
    pub catalog: PathBuf,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub out: PathBuf,

    /// Increase verbosity (-v DEBUG, -vv TRACE, -vvv TRACE with file/line)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Site layout described by the flags.
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new()
            .src_dir(&self.src)
            .catalog(&self.catalog)
            .out_dir(&self.out)
            .port(self.port)
    }
}
