use aisle_classify::Engine;
use aisle_core::{Catalog, Error, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared server state.
///
/// The catalog inside the engine is never mutated. A reload builds a fresh
/// catalog and swaps the engine pointer; requests already holding the old
/// `Arc<Engine>` finish against the old catalog.
pub struct ServiceState {
    engine: RwLock<Arc<Engine>>,
    catalog_path: Option<PathBuf>,
}

impl ServiceState {
    pub fn new(engine: Engine, catalog_path: Option<PathBuf>) -> Self {
        Self {
            engine: RwLock::new(Arc::new(engine)),
            catalog_path,
        }
    }

    /// Snapshot of the current engine
    pub fn engine(&self) -> Arc<Engine> {
        self.engine.read().clone()
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Swap in a new catalog, keeping policies and encoder
    pub fn replace_catalog(&self, catalog: Catalog) -> Arc<Engine> {
        let next = Arc::new(self.engine().with_catalog(Arc::new(catalog)));
        *self.engine.write() = next.clone();
        next
    }

    /// Re-read the catalog file. On failure the current catalog stays in place.
    pub fn reload(&self) -> Result<Arc<Engine>> {
        let path = self
            .catalog_path
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("no catalog file configured".to_string()))?;

        match Catalog::from_json_file(path) {
            Ok(catalog) => {
                info!("Reloaded catalog: {} entries", catalog.len());
                Ok(self.replace_catalog(catalog))
            }
            Err(e) => {
                warn!("Catalog reload failed, keeping current catalog: {}", e);
                Err(e)
            }
        }
    }
}
