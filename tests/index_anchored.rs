//! End-to-end properties of the anchored count pipeline.

mod common;

use common::{page, TestCorpus};
use lexigraph::{CountStore, IndexOptions, Indexer, OpenStore, SqliteStore, Whitelist};
use std::sync::Arc;

fn indexer(store: Arc<SqliteStore>, tokens: &[&str]) -> Indexer {
    let whitelist: Whitelist = tokens.iter().copied().collect();
    Indexer::new(store, whitelist, IndexOptions::default()).unwrap()
}

#[tokio::test]
async fn buckets_cooccurring_tokens_by_anchor_level() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("anchor", 1), ("one", 1), ("two", 2)])]);

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    indexer(store.clone(), &["one", "two", "anchor"])
        .index_anchored(&fixture.corpus(), "anchor")
        .await
        .unwrap();

    assert_eq!(store.token_year_level_count("one", 1901, 1).unwrap(), 1);
    assert_eq!(store.token_year_level_count("two", 1901, 1).unwrap(), 2);
}

#[tokio::test]
async fn same_level_on_different_pages_sums() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(
        1901,
        vec![
            page(&[("lit", 1), ("aaa", 1)]),
            page(&[("lit", 2), ("aaa", 2)]),
            page(&[("lit", 2), ("aaa", 3)]),
            page(&[("lit", 3), ("aaa", 4)]),
        ],
    );

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    indexer(store.clone(), &["aaa"])
        .index_anchored(&fixture.corpus(), "lit")
        .await
        .unwrap();

    assert_eq!(store.token_year_level_count("aaa", 1901, 1).unwrap(), 1);
    assert_eq!(store.token_year_level_count("aaa", 1901, 2).unwrap(), 2 + 3);
    assert_eq!(store.token_year_level_count("aaa", 1901, 3).unwrap(), 4);
}

#[tokio::test]
async fn pages_without_the_anchor_contribute_nothing() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(
        1901,
        vec![page(&[("noise", 50)]), page(&[("anchor", 1), ("one", 1)])],
    );

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    indexer(store.clone(), &["one", "noise"])
        .index_anchored(&fixture.corpus(), "anchor")
        .await
        .unwrap();

    assert_eq!(store.token_year_level_count("one", 1901, 1).unwrap(), 1);
    // The anchorless page's tokens land in no bucket
    for level in 1..=50 {
        assert_eq!(
            store.token_year_level_count("noise", 1901, level).unwrap(),
            0
        );
    }
}

#[tokio::test]
async fn levels_merge_across_volumes_of_the_same_year() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("anchor", 2), ("aaa", 3)])]);
    fixture.add_volume(1901, vec![page(&[("anchor", 2), ("aaa", 4)])]);

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    indexer(store.clone(), &["aaa"])
        .index_anchored(&fixture.corpus(), "anchor")
        .await
        .unwrap();

    assert_eq!(store.token_year_level_count("aaa", 1901, 2).unwrap(), 7);
}

#[tokio::test]
async fn whitelist_and_rerun_semantics_match_the_count_pipeline() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("anchor", 1), ("kept", 2), ("dropped", 3)])]);
    let corpus = fixture.corpus();

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let engine = indexer(store.clone(), &["kept"]);
    engine.index_anchored(&corpus, "anchor").await.unwrap();
    engine.index_anchored(&corpus, "anchor").await.unwrap();

    // Additive across runs, whitelist applied at commit
    assert_eq!(store.token_year_level_count("kept", 1901, 1).unwrap(), 4);
    assert_eq!(store.token_year_level_count("dropped", 1901, 1).unwrap(), 0);
}

#[tokio::test]
async fn malformed_volumes_are_skipped() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("anchor", 1), ("one", 1)])]);
    fixture.add_raw("not a volume");

    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let stats = indexer(store.clone(), &["one"])
        .index_anchored(&fixture.corpus(), "anchor")
        .await
        .unwrap();

    assert_eq!(stats.volumes, 1);
    assert_eq!(stats.skipped, 1);
}
