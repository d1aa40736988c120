use fxhash::FxHashMap;

use super::{location::LocationIdx, weight::Weight};

pub type ProductId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    center: LocationIdx,
    unit_weight: Weight,
}

impl CatalogEntry {
    pub fn new(center: LocationIdx, unit_weight: Weight) -> Self {
        CatalogEntry {
            center,
            unit_weight,
        }
    }

    /// Center the product ships from.
    pub fn center(&self) -> LocationIdx {
        self.center
    }

    pub fn unit_weight(&self) -> Weight {
        self.unit_weight
    }
}

/// Product identifier to origin center and unit weight.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: FxHashMap<ProductId, CatalogEntry>,
}

impl Catalog {
    pub fn get(&self, product: &str) -> Option<&CatalogEntry> {
        self.entries.get(product)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by product identifier.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        let mut entries = self
            .entries
            .iter()
            .map(|(product, entry)| (product.as_str(), entry))
            .collect::<Vec<_>>();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Returns the previous entry if the product was already listed.
    pub(crate) fn insert(&mut self, product: ProductId, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(product, entry)
    }
}
