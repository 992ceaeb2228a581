pub(crate) use super::*;
pub(crate) use crate::text::vectorize::SparseVector;

#[test]
fn test_cosine_identical_direction_is_one() {
    let a = SparseVector::new(vec![(0, 1.0), (1, 2.0)]);
    let b = SparseVector::new(vec![(0, 3.0), (1, 6.0)]);
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
}

#[test]
fn test_cosine_no_overlap_is_zero() {
    let a = SparseVector::new(vec![(0, 1.0)]);
    let b = SparseVector::new(vec![(1, 1.0)]);
    assert_eq!(cosine_similarity(&a, &b), 0.0);
}

#[test]
fn test_cosine_zero_vector_is_zero_not_nan() {
    let a = SparseVector::empty();
    let b = SparseVector::new(vec![(0, 1.0)]);
    assert_eq!(cosine_similarity(&a, &b), 0.0);
    assert_eq!(cosine_similarity(&b, &a), 0.0);
    assert_eq!(cosine_similarity(&a, &a), 0.0);
}

#[test]
fn test_cosine_hand_computed() {
    // dot = 1, norms = sqrt(2) each => 0.5
    let a = SparseVector::new(vec![(0, 1.0), (1, 1.0)]);
    let b = SparseVector::new(vec![(0, 1.0), (2, 1.0)]);
    assert!((cosine_similarity(&a, &b) - 0.5).abs() < 1e-12);
}

#[test]
fn test_query_returns_scores_in_corpus_order() {
    let corpus = vec![
        SparseVector::new(vec![(0, 1.0), (1, 1.0)]),
        SparseVector::new(vec![(0, 1.0), (2, 1.0)]),
        SparseVector::new(vec![(3, 1.0)]),
    ];
    let index = SimilarityIndex::new(corpus);
    assert_eq!(index.len(), 3);

    let query = SparseVector::new(vec![(0, 1.0), (1, 1.0)]);
    let scores = index.query(&query);

    assert_eq!(scores.len(), 3);
    assert!((scores[0] - 1.0).abs() < 1e-12); // self
    assert!((scores[1] - 0.5).abs() < 1e-12); // half overlap
    assert_eq!(scores[2], 0.0); // disjoint
}

#[test]
fn test_query_ignores_unseen_ids() {
    let index = SimilarityIndex::new(vec![SparseVector::new(vec![(0, 1.0)])]);

    // id 99 was never indexed; only id 0 contributes.
    let query = SparseVector::new(vec![(0, 1.0), (99, 100.0)]);
    let scores = index.query(&query);
    let expected = 1.0 / (1.0_f64 + 100.0 * 100.0).sqrt();
    assert!((scores[0] - expected).abs() < 1e-12);
}

#[test]
fn test_query_zero_vector_scores_all_zero() {
    let index = SimilarityIndex::new(vec![
        SparseVector::new(vec![(0, 1.0)]),
        SparseVector::new(vec![(1, 2.0)]),
    ]);
    assert_eq!(index.query(&SparseVector::empty()), vec![0.0, 0.0]);
}

#[test]
fn test_zero_corpus_document_scores_zero() {
    let index = SimilarityIndex::new(vec![SparseVector::empty()]);
    let scores = index.query(&SparseVector::new(vec![(0, 1.0)]));
    assert_eq!(scores, vec![0.0]);
}

#[test]
fn test_empty_index() {
    let index = SimilarityIndex::new(Vec::new());
    assert!(index.is_empty());
    assert!(index.query(&SparseVector::new(vec![(0, 1.0)])).is_empty());
}

#[test]
fn test_document_accessor() {
    let index = SimilarityIndex::new(vec![SparseVector::new(vec![(0, 1.0)])]);
    assert!(index.document(0).is_some());
    assert!(index.document(1).is_none());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn vector_strategy() -> impl Strategy<Value = SparseVector> {
        prop::collection::vec((0u32..16, 0.01f64..10.0), 0..8).prop_map(SparseVector::new)
    }

    proptest! {
        #[test]
        fn prop_cosine_in_unit_interval(a in vector_strategy(), b in vector_strategy()) {
            // Non-negative weights keep the similarity inside [0, 1].
            let sim = cosine_similarity(&a, &b);
            prop_assert!((0.0..=1.0 + 1e-12).contains(&sim));
        }

        #[test]
        fn prop_cosine_symmetric(a in vector_strategy(), b in vector_strategy()) {
            prop_assert!((cosine_similarity(&a, &b) - cosine_similarity(&b, &a)).abs() < 1e-12);
        }

        #[test]
        fn prop_self_similarity_is_one(a in vector_strategy()) {
            let expected = if a.is_empty() { 0.0 } else { 1.0 };
            prop_assert!((cosine_similarity(&a, &a) - expected).abs() < 1e-9);
        }
    }
}
