//! Property tests for in-memory store search ordering.

use std::collections::HashMap;

use proptest::prelude::*;
use raseed_retrieval::document::Document;
use raseed_retrieval::inmemory::InMemoryDocumentStore;
use raseed_retrieval::store::DocumentStore;

const DIM: usize = 16;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a document with a normalized embedding.
fn arb_document(dim: usize) -> impl Strategy<Value = Document> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| Document { id, text, metadata: HashMap::new(), embedding },
    )
}

/// For any set of stored documents, similarity search returns results
/// ordered by descending cosine score, bounded by `top_k` and by the
/// number of stored documents.
mod prop_search_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            documents in proptest::collection::vec(arb_document(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, count) = rt.block_on(async {
                let store = InMemoryDocumentStore::new(DIM);
                let count = documents.len();
                for document in &documents {
                    store.put_document(document.clone()).await.unwrap();
                }
                let results = store.similarity_search(&query, top_k).await.unwrap();
                (results, count)
            });

            // Result count is at most top_k and at most the number of
            // stored documents.
            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= count);

            // Results are ordered by descending score, up to the
            // tie-break epsilon.
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score - 1e-6,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
