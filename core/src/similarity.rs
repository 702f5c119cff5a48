use crate::vectorize::SparseVector;

/// Cosine of the angle between `a` and `b`; 0 when either is a zero vector.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    // weights are non-negative, so only rounding can leave [0, 1]
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Score `query` against every row; `ids` and `rows` are aligned by index.
pub fn score_all<'a>(ids: &[&'a str], query: &SparseVector, rows: &[SparseVector]) -> Vec<(&'a str, f32)> {
    debug_assert_eq!(ids.len(), rows.len());
    ids.iter().zip(rows).map(|(id, row)| (*id, cosine(query, row))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(entries: &[(u32, f32)]) -> SparseVector {
        SparseVector { entries: entries.to_vec() }
    }

    #[test]
    fn identical_vectors_score_one() {
        let a = v(&[(0, 3.0), (4, 4.0)]);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn magnitude_does_not_matter() {
        let a = v(&[(0, 1.0), (1, 1.0)]);
        let b = v(&[(0, 10.0), (1, 10.0)]);
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_vectors_score_zero() {
        assert_eq!(cosine(&v(&[(0, 1.0)]), &v(&[(1, 1.0)])), 0.0);
    }

    #[test]
    fn zero_vector_is_not_nan() {
        let zero = SparseVector::default();
        assert_eq!(cosine(&zero, &v(&[(0, 1.0)])), 0.0);
        assert_eq!(cosine(&zero, &zero), 0.0);
    }

    #[test]
    fn scores_keep_row_order() {
        let q = v(&[(0, 1.0)]);
        let rows = vec![v(&[(1, 1.0)]), v(&[(0, 1.0)])];
        let scored = score_all(&["a", "b"], &q, &rows);
        assert_eq!(scored, vec![("a", 0.0), ("b", 1.0)]);
    }
}
