//! Options store
//!
//! Owns the [`OptionCatalog`] and writes it back in full after every
//! mutation. A mutation is applied to a copy first; the in-memory catalog
//! only changes once the copy is stored.

use super::storage::CatalogStorage;
use shared::error::AppResult;
use shared::models::{BrandScope, Category, OptionCatalog};
use tracing::{debug, info, instrument, warn};

pub struct OptionsStore {
    catalog: OptionCatalog,
    storage: Box<dyn CatalogStorage>,
}

impl std::fmt::Debug for OptionsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsStore")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl OptionsStore {
    /// Rehydrate the catalog from storage
    ///
    /// An empty slot yields the default catalog. A value that does not decode
    /// is logged and replaced by the defaults in memory; it is overwritten on
    /// the next mutation.
    #[instrument(skip(storage))]
    pub fn load(storage: Box<dyn CatalogStorage>) -> AppResult<Self> {
        let catalog = match storage.read()? {
            None => {
                info!("No stored options, using defaults");
                OptionCatalog::default()
            }
            Some(bytes) => match serde_json::from_slice::<OptionCatalog>(&bytes) {
                Ok(catalog) => {
                    debug!(
                        branches = catalog.branches.len(),
                        types = catalog.types.len(),
                        "Options loaded"
                    );
                    catalog
                }
                Err(e) => {
                    warn!(error = %e, "Stored options are malformed, using defaults");
                    OptionCatalog::default()
                }
            },
        };

        Ok(Self { catalog, storage })
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn brand_scope(&self) -> BrandScope {
        self.catalog.brand_scope()
    }

    /// Serialize the entire catalog into the storage slot
    pub fn save(&self) -> AppResult<()> {
        self.write(&self.catalog)
    }

    fn write(&self, catalog: &OptionCatalog) -> AppResult<()> {
        let bytes = serde_json::to_vec(catalog)?;
        self.storage.write(&bytes)?;
        Ok(())
    }

    /// Store `next`, then make it the live catalog
    fn commit(&mut self, next: OptionCatalog) -> AppResult<()> {
        self.write(&next)?;
        self.catalog = next;
        Ok(())
    }

    /// Add a trimmed value to a list and persist
    ///
    /// Blank input is a no-op returning `Ok(None)`; otherwise returns the
    /// stored value.
    #[instrument(skip(self))]
    pub fn add(
        &mut self,
        category: Category,
        scope_type: Option<&str>,
        value: &str,
    ) -> AppResult<Option<String>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        let mut next = self.catalog.clone();
        next.insert(category, scope_type, value)?;
        self.commit(next)?;

        info!(category = %category, value, "Option added");
        Ok(Some(value.to_string()))
    }

    /// Remove a value from a list and persist; returns whether it existed
    #[instrument(skip(self))]
    pub fn remove(
        &mut self,
        category: Category,
        value: &str,
        scope_type: Option<&str>,
    ) -> AppResult<bool> {
        let mut next = self.catalog.clone();
        if !next.remove(category, value, scope_type) {
            return Ok(false);
        }
        self.commit(next)?;

        info!(category = %category, value, "Option removed");
        Ok(true)
    }

    /// Entries the dropdown for `category` shows
    pub fn entries(&self, category: Category, scope_type: Option<&str>) -> &[String] {
        self.catalog.list(category, scope_type)
    }

    pub fn contains(&self, category: Category, value: &str, scope_type: Option<&str>) -> bool {
        self.catalog.contains(category, value, scope_type)
    }
}
