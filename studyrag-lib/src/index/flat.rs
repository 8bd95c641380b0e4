use crate::chunk::Chunk;
use crate::embed::Embedding;
use crate::index::SearchHit;
use crate::{Error, Result};

/// Brute-force flat index over embeddings with aligned chunk records.
///
/// Position `i` in the embedding list and the record list refer to the same
/// logical entry. The index only grows by append; re-ingestion builds a
/// fresh index rather than mutating this one. Suitable for thousands of
/// chunks, which is the scale one study session produces.
pub struct FlatIndex {
    dim: usize,
    embeddings: Vec<Embedding>,
    records: Vec<Chunk>,
}

impl FlatIndex {
    /// Create an empty index for embeddings of the given dimension.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            embeddings: Vec::new(),
            records: Vec::new(),
        }
    }

    /// The fixed embedding dimension this index accepts.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a batch of embeddings with their aligned chunk records.
    ///
    /// The batch is validated before anything is stored, so a failed call
    /// leaves the index unchanged. Fails when the two slices differ in
    /// length or any embedding does not match the index dimension.
    pub fn add(&mut self, embeddings: &[Embedding], records: &[Chunk]) -> Result<()> {
        if embeddings.len() != records.len() {
            return Err(Error::Index(format!(
                "got {} embeddings for {} records",
                embeddings.len(),
                records.len()
            )));
        }
        for e in embeddings {
            if e.len() != self.dim {
                return Err(Error::Index(format!(
                    "embedding dimension {} does not match index dimension {}",
                    e.len(),
                    self.dim
                )));
            }
        }

        self.embeddings.extend_from_slice(embeddings);
        self.records.extend_from_slice(records);
        Ok(())
    }

    /// Return up to `k` entries nearest to `query`, closest first.
    ///
    /// Distances are squared Euclidean; entries at equal distance keep their
    /// insertion order. An empty index yields an empty result. A query of
    /// the wrong dimension is a caller bug and fails loudly.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim {
            return Err(Error::Index(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dim
            )));
        }

        let mut scored: Vec<(f32, usize)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (squared_l2(query, e), i))
            .collect();

        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, i)| SearchHit {
                chunk: self.records[i].clone(),
                distance,
            })
            .collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");

    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, text: &str) -> Chunk {
        Chunk {
            chunk_id: id,
            page_num: 1,
            source: "doc".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_squared_l2() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, 4.0];
        assert_eq!(squared_l2(&a, &b), 25.0);
        assert_eq!(squared_l2(&a, &a), 0.0);
    }

    #[test]
    fn test_search_ranks_by_distance() {
        let mut index = FlatIndex::new(2);
        index
            .add(
                &[
                    vec![3.0, 1.0], // squared distance 10
                    vec![1.0, 0.0], // squared distance 1
                    vec![2.0, 1.0], // squared distance 5
                ],
                &[record(0, "far"), record(1, "near"), record(2, "mid")],
            )
            .unwrap();

        let hits = index.search(&[0.0, 0.0], 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.chunk_id, 1);
        assert_eq!(hits[0].distance, 1.0);
        assert_eq!(hits[1].chunk.chunk_id, 2);
        assert_eq!(hits[1].distance, 5.0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut index = FlatIndex::new(2);
        index
            .add(
                &[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]],
                &[record(0, "a"), record(1, "b"), record(2, "c")],
            )
            .unwrap();

        // Records 0 and 2 are equidistant from the origin query; 0 was
        // inserted first and must come first.
        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<u64> = hits.iter().map(|h| h.chunk.chunk_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_index_returns_empty() {
        let index = FlatIndex::new(4);
        let hits = index.search(&[0.0; 4], 5).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_k_larger_than_len() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[vec![1.0, 0.0]], &[record(0, "only")])
            .unwrap();

        let hits = index.search(&[0.0, 0.0], 100).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_k_zero() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[vec![1.0, 0.0]], &[record(0, "only")])
            .unwrap();

        assert!(index.search(&[0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_misaligned_batch() {
        let mut index = FlatIndex::new(2);
        let err = index.add(&[vec![1.0, 0.0]], &[record(0, "a"), record(1, "b")]);
        assert!(err.is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_add_rejects_wrong_dimension() {
        let mut index = FlatIndex::new(2);
        let err = index.add(
            &[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]],
            &[record(0, "a"), record(1, "b")],
        );
        assert!(err.is_err());
        // Validation happens before storage, nothing was appended.
        assert!(index.is_empty());
    }

    #[test]
    fn test_search_rejects_wrong_query_dimension() {
        let mut index = FlatIndex::new(2);
        index
            .add(&[vec![1.0, 0.0]], &[record(0, "only")])
            .unwrap();

        assert!(index.search(&[1.0, 0.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_appends_accumulate() {
        let mut index = FlatIndex::new(1);
        index.add(&[vec![1.0]], &[record(0, "a")]).unwrap();
        index.add(&[vec![2.0]], &[record(1, "b")]).unwrap();

        assert_eq!(index.len(), 2);
        let hits = index.search(&[0.0], 2).unwrap();
        assert_eq!(hits[0].chunk.chunk_id, 0);
        assert_eq!(hits[1].chunk.chunk_id, 1);
    }

    #[test]
    fn test_hit_metadata_is_a_copy() {
        let mut index = FlatIndex::new(1);
        let mut chunk = record(0, "original");
        index.add(&[vec![1.0]], &[chunk.clone()]).unwrap();

        // Mutating the caller's chunk after add must not affect results.
        chunk.text = "mutated".to_string();
        let hits = index.search(&[0.0], 1).unwrap();
        assert_eq!(hits[0].chunk.text, "original");
    }
}
