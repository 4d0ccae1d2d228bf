//! Catalog loading from catalog.toml
//!
//! The service catalog can be overridden with a TOML file listing categories
//! and their sub-services. When no file exists the built-in catalog is used.

use crate::core::catalog::{Catalog, ServiceCategoryData};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Structure of the catalog.toml file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<ServiceCategoryData>,
}

/// Parses and validates catalog TOML.
///
/// # Errors
/// Returns `Error::Config` if the TOML is malformed, a category id is not one
/// of the known ids, or ids are duplicated.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })?;
    Catalog::new(file.categories)
}

/// Loads the catalog from `path`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    debug!("Attempting to load catalog from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {path_ref:?}: {e}"),
    })?;
    parse_catalog(&contents)
}

/// Loads the catalog from `path` if the file exists, otherwise returns the
/// built-in catalog. A file that exists but fails to parse is still an error.
pub fn load_catalog_or_builtin<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        let catalog = load_catalog(path_ref)?;
        info!(
            categories = catalog.categories.len(),
            "Loaded service catalog from {:?}", path_ref
        );
        Ok(catalog)
    } else {
        info!("No catalog file at {:?}, using built-in catalog", path_ref);
        Ok(Catalog::builtin())
    }
}
