use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::search::{find_nearest, Neighbor};
use crate::{Category, Error, Result, Vector};

/// One record of the precomputed catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub name: String,
    pub vector: Vec<f32>,
    pub category: Category,
}

/// A reference item with its embedding. Immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(skip)]
    pub vector: Vector,
    pub category: Category,
    #[serde(skip)]
    name_lower: String,
}

impl CatalogEntry {
    /// The vector is expected to be unit length already.
    #[must_use]
    pub fn new(name: impl Into<String>, vector: Vector, category: Category) -> Self {
        let name = name.into();
        let name_lower = name.to_lowercase();
        Self {
            name,
            vector,
            category,
            name_lower,
        }
    }

    /// Build from an ingested record, normalizing its vector
    #[must_use]
    pub fn from_record(record: CatalogRecord) -> Self {
        let mut vector = Vector::new(record.vector);
        vector.normalize();
        Self::new(record.name, vector, record.category)
    }

    /// Lower-cased name used for case-insensitive matching
    #[inline]
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }
}

/// Fixed, read-only reference table.
///
/// There are no update or delete operations: when reference data changes a
/// new catalog is built and swapped in whole.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
    dim: usize,
}

impl Catalog {
    /// Build a catalog from entries that share one dimension.
    ///
    /// Fails with [`Error::Schema`] on empty input, zero-length vectors or a
    /// dimension that differs from the first entry's.
    pub fn load<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut iter = entries.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| Error::Schema("catalog input is empty".to_string()))?;

        let dim = first.vector.dim();
        if dim == 0 {
            return Err(Error::Schema(format!(
                "entry '{}' has an empty vector",
                first.name
            )));
        }

        let mut table = vec![Arc::new(first)];
        for entry in iter {
            if entry.vector.dim() != dim {
                return Err(Error::Schema(format!(
                    "entry '{}' has dimension {}, catalog dimension is {}",
                    entry.name,
                    entry.vector.dim(),
                    dim
                )));
            }
            table.push(Arc::new(entry));
        }

        debug!("Catalog built with {} entries of dimension {}", table.len(), dim);
        Ok(Self { entries: table, dim })
    }

    /// Build from raw ingestion records, normalizing every vector
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        Self::load(records.into_iter().map(CatalogEntry::from_record))
    }

    /// Read a JSON array of `{name, vector, category}` records
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<CatalogRecord> = serde_json::from_reader(reader)?;
        Self::from_records(records)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_json_reader(BufReader::new(file))?;

        info!(
            "Loaded catalog from {:?}: {} entries, dimension {}",
            path,
            catalog.len(),
            catalog.dimension()
        );
        for (category, count) in catalog.category_counts() {
            if count > 0 {
                info!("  {}: {} items", category, count);
            }
        }
        Ok(catalog)
    }

    /// An explicitly empty catalog. Every lookup against it is a "no match".
    #[must_use]
    pub fn empty(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn entries(&self) -> &[Arc<CatalogEntry>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogEntry>> {
        self.entries.iter()
    }

    /// Top-k nearest entries to `query`
    pub fn search(&self, query: &Vector, k: usize) -> Result<Vec<Neighbor>> {
        find_nearest(query, self, k)
    }

    /// Entry counts per category, in [`Category::ALL`] order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        let mut counts = [0usize; Category::COUNT];
        for entry in &self.entries {
            if let Some(slot) = Category::ALL.iter().position(|c| *c == entry.category) {
                counts[slot] += 1;
            }
        }
        Category::ALL.iter().copied().zip(counts).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn entry(name: &str, vector: Vec<f32>, category: Category) -> CatalogEntry {
        CatalogEntry::new(name, Vector::new(vector), category)
    }

    #[test]
    fn test_load() {
        let catalog = Catalog::load(vec![
            entry("apple", vec![1.0, 0.0], Category::Produce),
            entry("milk", vec![0.0, 1.0], Category::Dairy),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.dimension(), 2);
        assert_eq!(catalog.entries()[1].name, "milk");
    }

    #[test]
    fn test_load_rejects_empty_input() {
        let result = Catalog::load(Vec::new());
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_load_rejects_mixed_dimensions() {
        let result = Catalog::load(vec![
            entry("apple", vec![1.0, 0.0], Category::Produce),
            entry("milk", vec![0.0, 1.0, 0.0], Category::Dairy),
        ]);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_load_rejects_zero_dimension() {
        let result = Catalog::load(vec![entry("air", vec![], Category::Other)]);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_records_are_normalized() {
        let catalog = Catalog::from_records(vec![CatalogRecord {
            name: "Bread".to_string(),
            vector: vec![3.0, 4.0],
            category: Category::Bakery,
        }])
        .unwrap();

        let stored = &catalog.entries()[0];
        assert!((stored.vector.norm() - 1.0).abs() < 1e-6);
        assert_eq!(stored.name_lower(), "bread");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Salmon", "vector": [1.0, 0.0, 0.0], "category": "Meat & Seafood"}},
                {{"name": "Dog food", "vector": [0.0, 2.0, 0.0], "category": "Pet Supplies"}},
                {{"name": "Shrimp", "vector": [0.0, 0.0, 1.0], "category": "Meat & Seafood"}}
            ]"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.dimension(), 3);

        let counts = catalog.category_counts();
        assert_eq!(counts.len(), Category::COUNT);
        assert!(counts.contains(&(Category::MeatAndSeafood, 2)));
        assert!(counts.contains(&(Category::PetSupplies, 1)));
        assert!(counts.contains(&(Category::Dairy, 0)));
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let json = r#"[{"name": "Laptop", "vector": [1.0], "category": "Electronics"}]"#;
        let result = Catalog::from_json_reader(json.as_bytes());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_from_json_rejects_empty_array() {
        let result = Catalog::from_json_reader("[]".as_bytes());
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Catalog::from_json_file("/nonexistent/catalog.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::empty(384);
        assert!(catalog.is_empty());
        assert_eq!(catalog.dimension(), 384);
        assert!(catalog.category_counts().iter().all(|(_, n)| *n == 0));
    }
}
