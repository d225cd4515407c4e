use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::{Catalog, CatalogEntry, Error, Result, Vector};

/// Catalogs at least this large are scored on the rayon pool
const PARALLEL_SCAN_THRESHOLD: usize = 4096;

/// A catalog entry paired with its similarity to a query
#[derive(Debug, Clone, Serialize)]
pub struct Neighbor {
    #[serde(rename = "item")]
    pub entry: Arc<CatalogEntry>,
    pub similarity: f32,
}

impl Neighbor {
    #[inline]
    #[must_use]
    pub fn new(entry: Arc<CatalogEntry>, similarity: f32) -> Self {
        Self { entry, similarity }
    }
}

// Heap key: higher score wins, then lower catalog index
type RankKey = (OrderedFloat<f32>, Reverse<usize>);

/// Return the `k` catalog entries most similar to `query`, best first.
///
/// Similarity is the plain dot product; catalog vectors and the query are
/// expected to be unit length. Equal scores keep catalog order, so repeated
/// calls on the same input always agree. Returns fewer than `k` only when
/// the catalog is smaller than `k`; an empty catalog matches nothing.
pub fn find_nearest(query: &Vector, catalog: &Catalog, k: usize) -> Result<Vec<Neighbor>> {
    if catalog.is_empty() {
        return Ok(Vec::new());
    }

    if query.dim() != catalog.dimension() {
        return Err(Error::DimensionMismatch {
            expected: catalog.dimension(),
            actual: query.dim(),
        });
    }

    if k == 0 {
        return Ok(Vec::new());
    }

    let entries = catalog.entries();
    let scores: Vec<f32> = if entries.len() >= PARALLEL_SCAN_THRESHOLD {
        entries.par_iter().map(|e| query.dot(&e.vector)).collect()
    } else {
        entries.iter().map(|e| query.dot(&e.vector)).collect()
    };

    // Min-heap holding the best k seen so far; the root is the weakest keeper
    let k = k.min(entries.len());
    let mut heap: BinaryHeap<Reverse<RankKey>> = BinaryHeap::with_capacity(k + 1);
    for (idx, &score) in scores.iter().enumerate() {
        let key = (OrderedFloat(score), Reverse(idx));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(Reverse(weakest)) = heap.peek() {
            if key > *weakest {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }

    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse((score, Reverse(idx)))| Neighbor::new(entries[idx].clone(), score.0))
        .collect())
}
