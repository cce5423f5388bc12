//! Co-occurrence graph building and per-year persistence.

mod common;

use common::{page, TestCorpus};
use lexigraph::{build_token_graph, build_year_token_graphs, YearGraphs};

#[tokio::test]
async fn graph_weights_are_symmetric() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("query", 2), ("alpha", 3), ("beta", 1)])]);

    let graph = build_token_graph(&fixture.corpus(), "query", 4)
        .await
        .unwrap();

    for (a, b) in [("query", "alpha"), ("alpha", "beta"), ("query", "beta")] {
        assert_eq!(graph.weight(a, b), graph.weight(b, a));
        assert!(graph.weight(a, b) > 0);
    }
}

#[tokio::test]
async fn edge_weights_are_page_count_products() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("query", 2), ("alpha", 3)])]);

    let graph = build_token_graph(&fixture.corpus(), "query", 2)
        .await
        .unwrap();

    assert_eq!(graph.weight("query", "alpha"), 6);
}

#[tokio::test]
async fn per_volume_graphs_sum_into_the_corpus_graph() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("query", 1), ("alpha", 2)])]);
    fixture.add_volume(1955, vec![page(&[("query", 1), ("alpha", 5)])]);

    let graph = build_token_graph(&fixture.corpus(), "query", 4)
        .await
        .unwrap();

    assert_eq!(graph.weight("query", "alpha"), 7);
}

#[tokio::test]
async fn pages_without_the_query_token_are_ignored() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(
        1901,
        vec![
            page(&[("alpha", 4), ("beta", 4)]),
            page(&[("query", 1), ("alpha", 1)]),
        ],
    );

    let graph = build_token_graph(&fixture.corpus(), "query", 2)
        .await
        .unwrap();

    assert_eq!(graph.weight("alpha", "beta"), 0);
    assert_eq!(graph.weight("query", "alpha"), 1);
}

#[tokio::test]
async fn absent_query_token_yields_an_empty_graph() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("alpha", 1), ("beta", 2)])]);

    let graph = build_token_graph(&fixture.corpus(), "missing", 2)
        .await
        .unwrap();

    assert!(graph.is_empty());
}

#[tokio::test]
async fn year_graphs_persist_and_union_tokens() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("query", 1), ("alpha", 2)])]);
    fixture.add_volume(1902, vec![page(&[("query", 1), ("beta", 3)])]);
    fixture.add_volume(1902, vec![page(&[("query", 2), ("beta", 1)])]);

    let graphs = build_year_token_graphs(&fixture.corpus(), "query", 4)
        .await
        .unwrap();
    assert_eq!(graphs.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let store = YearGraphs::new(dir.path());
    for (year, graph) in &graphs {
        store.save(*year, graph).unwrap();
    }

    assert_eq!(store.years().unwrap(), vec![1901, 1902]);

    // Same-year volumes merged by weight addition: 1*3 + 2*1
    let g1902 = store.graph_by_year(1902).unwrap();
    assert_eq!(g1902.weight("query", "beta"), 5);

    let tokens = store.all_tokens().unwrap();
    assert!(tokens.contains("query"));
    assert!(tokens.contains("alpha"));
    assert!(tokens.contains("beta"));
    assert_eq!(tokens.len(), 3);
}

#[tokio::test]
async fn unreadable_volumes_are_skipped() {
    let mut fixture = TestCorpus::new();
    fixture.add_volume(1901, vec![page(&[("query", 1), ("alpha", 1)])]);
    fixture.add_raw("broken");

    let graph = build_token_graph(&fixture.corpus(), "query", 2)
        .await
        .unwrap();

    assert_eq!(graph.weight("query", "alpha"), 1);
}
