//! Where a site's inputs live and where its output goes.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::template::ShellTemplate;

/// Default static-assets directory (also holds the shell template).
pub const DEFAULT_SRC_DIR: &str = "src";
/// Default catalog file.
pub const DEFAULT_CATALOG: &str = "api.yaml";
/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "dist";
/// Name of the shell template inside the assets directory, and of the
/// generated page inside the output directory.
pub const INDEX_FILE: &str = "index.html";
/// Default preview server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Paths and addresses for one site.
///
/// Relative paths resolve against the process's working directory.
///
/// ## Examples
///
/// ```
/// use apidocs_lib::SiteConfig;
/// use std::path::Path;
///
/// let config = SiteConfig::new()
///     .src_dir("docs/src")
///     .out_dir("public")
///     .port(8080);
///
/// assert_eq!(config.template_path(), Path::new("docs/src/index.html"));
/// assert_eq!(config.output_path(), Path::new("public/index.html"));
/// assert_eq!(config.serve_addr.port(), 8080);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Static assets copied verbatim into the output directory.
    pub src_dir: PathBuf,
    /// Shell template; defaults to `<src_dir>/index.html`.
    pub template: Option<PathBuf>,
    /// Catalog file, reloaded on every build.
    pub catalog: PathBuf,
    /// Output directory, created if missing.
    pub out_dir: PathBuf,
    /// Address the preview server binds to.
    pub serve_addr: SocketAddr,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(DEFAULT_SRC_DIR),
            template: None,
            catalog: PathBuf::from(DEFAULT_CATALOG),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            serve_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
        }
    }
}

impl SiteConfig {
    /// Creates a configuration with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration rooted at `root` (`<root>/src`, `<root>/api.yaml`, `<root>/dist`).
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            src_dir: root.join(DEFAULT_SRC_DIR),
            catalog: root.join(DEFAULT_CATALOG),
            out_dir: root.join(DEFAULT_OUT_DIR),
            ..Self::default()
        }
    }

    pub fn src_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.src_dir = path.into();
        self
    }

    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    pub fn catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = path.into();
        self
    }

    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = path.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.serve_addr.set_port(port);
        self
    }

    /// Path of the shell template.
    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| self.src_dir.join(INDEX_FILE))
    }

    /// Path of the generated page.
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(INDEX_FILE)
    }

    /// Checks that the shell template can be read before any build starts.
    ///
    /// ## Errors
    ///
    /// Returns [`BuildError::Template`] if the template is missing or
    /// unreadable.
    pub fn preflight(&self) -> Result<(), BuildError> {
        ShellTemplate::load(&self.template_path()).map(|_| ())
    }
}
