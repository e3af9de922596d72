//! # Source Module
//!
//! Builds a batch of [`ImageAsset`]s from command-line paths.
//!
//! - Files are read in the order given, whatever their extension, so a
//!   corrupt upload shows up as unreadable instead of vanishing.
//! - Directories contribute their image files sorted by name; hidden
//!   entries are skipped unless asked for.
//!
//! Missing or unreadable paths are collected as errors and the rest of the
//! batch is still loaded.

mod filter;

pub use filter::ImageFilter;

use crate::core::asset::ImageAsset;
use crate::error::SourceError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Options for directory inputs
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Include hidden files and directories
    pub include_hidden: bool,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Assets in batch order plus any paths that could not be read
#[derive(Debug, Default)]
pub struct SourceResult {
    pub assets: Vec<ImageAsset>,
    pub errors: Vec<SourceError>,
}

/// Loads assets from files and directories
pub struct AssetLoader {
    config: SourceConfig,
    filter: ImageFilter,
}

impl AssetLoader {
    pub fn new(config: SourceConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);
        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }
        Self { config, filter }
    }

    /// Load every path, in order
    pub fn load(&self, paths: &[PathBuf]) -> SourceResult {
        let mut result = SourceResult::default();

        for path in paths {
            if path.is_dir() {
                self.load_directory(path, &mut result);
            } else if path.exists() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                match read_asset(path, name) {
                    Ok(asset) => result.assets.push(asset),
                    Err(e) => result.errors.push(e),
                }
            } else {
                result.errors.push(SourceError::NotFound { path: path.clone() });
            }
        }

        debug!(
            assets = result.assets.len(),
            errors = result.errors.len(),
            "inputs loaded"
        );
        result
    }

    fn load_directory(&self, root: &Path, result: &mut SourceResult) {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let include_hidden = self.config.include_hidden;

        let walker = WalkDir::new(root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || include_hidden || !ImageFilter::is_hidden(entry.path())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    result.errors.push(SourceError::Walk {
                        path: e.path().unwrap_or(root).to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.filter.should_include(path) {
                continue;
            }

            // Relative names keep files from different subfolders apart
            let name = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned();

            match read_asset(path, name) {
                Ok(asset) => result.assets.push(asset),
                Err(e) => result.errors.push(e),
            }
        }
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

fn read_asset(path: &Path, name: String) -> Result<ImageAsset, SourceError> {
    let bytes = fs::read(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(ImageAsset::new(name, bytes))
}
