//! End-to-end tests for the sweep-line overlap index: the documented query
//! scenarios, boundary behaviors, query-order independence, and a seeded
//! randomized comparison against a brute-force scan.

use pretty_assertions::assert_eq;
use rand::prelude::*;
use rstest::{fixture, rstest};

use sorted_intersect::{is_overlapping, SortedIntersect};

fn build(spans: &[(u32, u32)]) -> SortedIntersect<u32, usize> {
    let mut itv = SortedIntersect::new();
    for (k, &(s, e)) in spans.iter().enumerate() {
        itv.add(s, e, k).unwrap();
    }
    itv.index();
    itv
}

fn search(itv: &mut SortedIntersect<u32, usize>, qs: u32, qe: u32) -> Vec<usize> {
    let mut found = Vec::new();
    itv.search_overlap(qs, qe, &mut found);
    found.sort_unstable();
    found
}

fn brute_force(spans: &[(u32, u32)], qs: u32, qe: u32) -> Vec<usize> {
    spans
        .iter()
        .enumerate()
        .filter(|&(_, &(s, e))| is_overlapping(s, e, qs, qe))
        .map(|(i, _)| i)
        .collect()
}

#[fixture]
fn sparse_spans() -> Vec<(u32, u32)> {
    vec![
        (1, 2),
        (3, 8),
        (5, 7),
        (7, 20),
        (9, 10),
        (13, 15),
        (15, 16),
        (19, 30),
        (22, 24),
        (24, 25),
        (26, 28),
        (32, 39),
        (34, 36),
        (38, 40),
    ]
}

#[fixture]
fn dense_spans() -> Vec<(u32, u32)> {
    vec![
        (0, 250_000_000),
        (55, 1055),
        (115, 1115),
        (130, 1130),
        (281, 1281),
        (639, 1639),
        (842, 1842),
        (999, 1999),
        (1094, 2094),
        (1157, 2157),
        (1161, 2161),
        (1265, 2265),
        (1532, 2532),
        (1590, 2590),
        (1665, 2665),
        (1945, 2945),
        (2384, 3384),
        (2515, 3515),
    ]
}

#[rstest]
fn test_sparse_overlap_query(sparse_spans: Vec<(u32, u32)>) {
    let mut itv = build(&sparse_spans);
    assert_eq!(search(&mut itv, 17, 21), vec![3, 7]);
}

#[rstest]
fn test_dense_overlap_query_reaches_chained_neighbours(dense_spans: Vec<(u32, u32)>) {
    let mut itv = build(&dense_spans);
    // the outer span plus everything crossing [1377, 2377]
    assert_eq!(
        search(&mut itv, 1377, 2377),
        vec![0, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
    );
}

#[rstest]
fn test_gap_query_skips_nested_runs() {
    let spans = [(10, 20), (11, 12), (13, 14), (15, 16), (25, 29)];
    let mut itv = build(&spans);
    assert_eq!(search(&mut itv, 17, 30), vec![0, 4]);
}

#[rstest]
fn test_empty_store() {
    let mut itv: SortedIntersect<u32, usize> = SortedIntersect::new();
    itv.index();
    assert_eq!(search(&mut itv, 0, 100), Vec::<usize>::new());
}

#[rstest]
fn test_single_degenerate_interval() {
    let mut itv = build(&[(5, 5)]);
    assert_eq!(search(&mut itv, 5, 5), vec![0]);
    assert_eq!(search(&mut itv, 4, 4), Vec::<usize>::new());
    assert_eq!(search(&mut itv, 5, 6), vec![0]);
}

#[rstest]
fn test_single_interval_boundaries() {
    let mut itv = build(&[(10, 20)]);
    assert_eq!(search(&mut itv, 12, 15), vec![0]);
    assert_eq!(search(&mut itv, 0, 9), Vec::<usize>::new());
    assert_eq!(search(&mut itv, 21, 30), Vec::<usize>::new());
    assert_eq!(search(&mut itv, 0, 10), vec![0]);
    assert_eq!(search(&mut itv, 20, 30), vec![0]);
}

#[rstest]
fn test_coincident_intervals() {
    let mut itv = build(&[(10, 20), (10, 30)]);
    assert_eq!(search(&mut itv, 15, 15), vec![0, 1]);
    let hits = itv.find(15, 15);
    assert_eq!(hits.len(), 2);
}

#[rstest]
fn test_nested_intervals_found_through_right_anchor() {
    let spans = [(0, 100), (10, 20), (30, 40), (50, 60), (70, 80), (90, 95)];
    let mut itv = build(&spans);
    for (qs, qe) in [(85, 92), (45, 45), (0, 100), (99, 120)] {
        assert_eq!(search(&mut itv, qs, qe), brute_force(&spans, qs, qe));
    }
}

#[rstest]
fn test_results_match_brute_force_on_query_grid(
    sparse_spans: Vec<(u32, u32)>,
    dense_spans: Vec<(u32, u32)>,
) {
    for spans in [sparse_spans, dense_spans] {
        let mut itv = build(&spans);
        let hi = spans.iter().map(|&(_, e)| e).max().unwrap() + 2;
        let probes: Vec<u32> = (0..50).map(|k| k * (hi / 50).max(1)).collect();
        for &qs in &probes {
            for width in [0, 1, 7, 1000] {
                let qe = qs.saturating_add(width);
                assert_eq!(
                    search(&mut itv, qs, qe),
                    brute_force(&spans, qs, qe),
                    "query [{qs}, {qe}]"
                );
            }
        }
    }
}

#[rstest]
fn test_query_order_does_not_change_results(dense_spans: Vec<(u32, u32)>) {
    let queries: Vec<(u32, u32)> = (0..40).map(|k| (k * 80, k * 80 + 700)).collect();

    let mut ascending = build(&dense_spans);
    let expected: Vec<Vec<usize>> = queries
        .iter()
        .map(|&(qs, qe)| search(&mut ascending, qs, qe))
        .collect();

    let mut descending = build(&dense_spans);
    for (k, &(qs, qe)) in queries.iter().enumerate().rev() {
        assert_eq!(search(&mut descending, qs, qe), expected[k]);
    }

    let mut shuffled = build(&dense_spans);
    let mut order: Vec<usize> = (0..queries.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(7));
    for k in order {
        let (qs, qe) = queries[k];
        assert_eq!(search(&mut shuffled, qs, qe), expected[k]);
    }
}

#[rstest]
fn test_no_duplicate_results(dense_spans: Vec<(u32, u32)>) {
    let mut itv = build(&dense_spans);
    for (qs, qe) in [(0, 4000), (1377, 2377), (1000, 1000), (2400, 2600)] {
        let found = search(&mut itv, qs, qe);
        let mut deduped = found.clone();
        deduped.dedup();
        assert_eq!(found, deduped);
    }
}

#[rstest]
fn test_randomized_against_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut spans: Vec<(u32, u32)> = Vec::new();
    let mut start = 0u32;
    for _ in 0..500 {
        start += rng.gen_range(0..40);
        let len = rng.gen_range(0..400);
        spans.push((start, start + len));
    }

    let hi = spans.iter().map(|&(_, e)| e).max().unwrap() + 100;
    let mut queries: Vec<(u32, u32)> = (0..300)
        .map(|_| {
            let qs = rng.gen_range(0..hi);
            (qs, qs + rng.gen_range(0..300))
        })
        .collect();
    queries.sort_unstable();

    // once in ascending order, once shuffled, same answers either way
    let mut itv = build(&spans);
    for &(qs, qe) in &queries {
        assert_eq!(search(&mut itv, qs, qe), brute_force(&spans, qs, qe));
    }
    queries.shuffle(&mut rng);
    for &(qs, qe) in &queries {
        assert_eq!(search(&mut itv, qs, qe), brute_force(&spans, qs, qe));
    }
}

#[rstest]
fn test_clear_and_rebuild_answers_match(sparse_spans: Vec<(u32, u32)>) {
    let mut itv = build(&sparse_spans);
    let before: Vec<Vec<usize>> = (0..45)
        .map(|k| search(&mut itv, k, k + 3))
        .collect();

    itv.clear();
    assert!(itv.is_empty());
    for (k, &(s, e)) in sparse_spans.iter().enumerate() {
        itv.add(s, e, k).unwrap();
    }
    itv.index();

    let after: Vec<Vec<usize>> = (0..45)
        .map(|k| search(&mut itv, k, k + 3))
        .collect();
    assert_eq!(after, before);
}
