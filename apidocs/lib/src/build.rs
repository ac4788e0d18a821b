//! One complete build pass: catalog + template in, `index.html` + assets out.
//!
//! A build is not transactional. If it fails after the asset copy has
//! started, the output directory is left partially updated.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::render::render;
use crate::template::ShellTemplate;

/// Summary of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The generated page.
    pub output: PathBuf,
    /// Number of endpoints rendered.
    pub endpoints: usize,
    /// Number of files copied from the assets directory.
    pub assets_copied: usize,
    pub elapsed: Duration,
}

/// Runs one build pass.
///
/// The template and catalog are re-read on every call, so edits are
/// picked up without restarting the process.
///
/// ## Errors
///
/// Fails on the first error: missing template, unreadable or invalid
/// catalog, an unrenderable endpoint, or any filesystem failure.
#[tracing::instrument(skip_all, fields(catalog = %config.catalog.display(), out = %config.out_dir.display()))]
pub fn build(config: &SiteConfig) -> Result<BuildReport, BuildError> {
    let started = Instant::now();

    let template = ShellTemplate::load(&config.template_path())?;
    let catalog = Catalog::load(&config.catalog)?;
    debug!(
        endpoints = catalog.api.endpoints.len(),
        types = catalog.types.len(),
        "catalog loaded"
    );

    let page = render(&catalog)?;
    let html = template.fill(&page);

    fs::create_dir_all(&config.out_dir).map_err(|source| BuildError::CreateOutput {
        path: config.out_dir.clone(),
        source,
    })?;

    let assets_copied = copy_assets(&config.src_dir, &config.out_dir)?;

    let output = config.output_path();
    fs::write(&output, html).map_err(|source| BuildError::WriteOutput {
        path: output.clone(),
        source,
    })?;

    let report = BuildReport {
        output,
        endpoints: catalog.api.endpoints.len(),
        assets_copied,
        elapsed: started.elapsed(),
    };
    info!(
        output = %report.output.display(),
        endpoints = report.endpoints,
        assets = report.assets_copied,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "build complete"
    );
    Ok(report)
}

/// Recursively copies `src` into `dest`, overwriting existing files.
///
/// If `dest` lives inside `src` it is skipped. Returns the number of files
/// copied.
fn copy_assets(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let dest_canonical = fs::canonicalize(dest).ok();
    let walker = WalkDir::new(src).min_depth(1).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && dest_canonical.is_some()
            && fs::canonicalize(entry.path()).ok() == dest_canonical)
    });

    let mut copied = 0;
    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| BuildError::CreateOutput {
                path: target.clone(),
                source,
            })?;
            continue;
        }

        debug!(from = %entry.path().display(), to = %target.display(), "copying asset");
        fs::copy(entry.path(), &target).map_err(|source| BuildError::CopyAsset {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source,
        })?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_assets_mirrors_tree_and_overwrites() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("img/icons")).unwrap();
        fs::write(src.path().join("style.css"), "body{}").unwrap();
        fs::write(src.path().join("img/icons/a.svg"), "<svg/>").unwrap();
        fs::write(dest.path().join("style.css"), "stale").unwrap();

        let copied = copy_assets(src.path(), dest.path()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.path().join("style.css")).unwrap(), "body{}");
        assert_eq!(
            fs::read_to_string(dest.path().join("img/icons/a.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn copy_assets_skips_nested_output_dir() {
        let src = tempfile::tempdir().unwrap();
        let dest = src.path().join("dist");
        fs::create_dir_all(&dest).unwrap();
        fs::write(src.path().join("a.txt"), "a").unwrap();
        fs::write(dest.join("old.txt"), "old").unwrap();

        let copied = copy_assets(src.path(), &dest).unwrap();

        assert_eq!(copied, 1);
        assert!(!dest.join("dist").exists());
    }

    #[test]
    fn copy_assets_fails_for_missing_source() {
        let dest = tempfile::tempdir().unwrap();
        let err = copy_assets(Path::new("/no/such/assets"), dest.path()).unwrap_err();
        assert!(matches!(err, BuildError::Walk(_)));
    }
}
