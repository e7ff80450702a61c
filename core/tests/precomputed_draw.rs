//! Precomputed (bucket table) draw tests.

use lottery_core::{
    algorithm::{ExcludeSet, PrecomputedRateDraw},
    index::ProbabilityIndex,
    model::{AwardRateInfo, Rate},
    rng::SeededPoints,
};
use std::collections::HashMap;
use std::sync::Arc;

fn rates(pairs: &[(&str, f64)]) -> Vec<AwardRateInfo> {
    pairs
        .iter()
        .map(|(id, r)| AwardRateInfo::new(*id, Rate::from_f64(id, *r).expect("valid rate")))
        .collect()
}

fn build(strategy_id: i64, pairs: &[(&str, f64)], seed: u64) -> PrecomputedRateDraw {
    let index = Arc::new(ProbabilityIndex::new());
    index.build(strategy_id, rates(pairs));
    PrecomputedRateDraw::new(index, Arc::new(SeededPoints::new(seed)))
}

#[test]
fn frequencies_follow_absolute_rates() {
    let alg = build(8, &[("A", 0.10), ("B", 0.30), ("C", 0.60)], 0xABCD);
    let mut counts: HashMap<Option<String>, usize> = HashMap::new();
    for _ in 0..50_000 {
        *counts.entry(alg.draw(8, &ExcludeSet::new())).or_insert(0) += 1;
    }
    assert!(!counts.contains_key(&None), "rates sum to one, so every point wins");
    let c = counts[&Some("C".to_string())] as f64 / 50_000.0;
    assert!((0.58..=0.62).contains(&c), "C share {c:.3} not near 0.60");
}

/// Unclaimed points are losing tickets: rates summing to 0.5 win about half the time.
#[test]
fn unclaimed_points_are_no_win() {
    let alg = build(8, &[("A", 0.20), ("B", 0.30)], 99);
    let wins = (0..20_000).filter(|_| alg.draw(8, &ExcludeSet::new()).is_some()).count();
    let share = wins as f64 / 20_000.0;
    assert!((0.47..=0.53).contains(&share), "win share {share:.3} not near 0.50");
}

/// Excluded awards are not redistributed: their points become no-wins.
#[test]
fn excluded_bucket_is_no_win_not_redraw() {
    let alg = build(8, &[("A", 0.10), ("B", 0.30), ("C", 0.60)], 17);
    let ex: ExcludeSet = ["C".to_string()].into_iter().collect();
    let mut misses = 0;
    for _ in 0..20_000 {
        match alg.draw(8, &ex) {
            Some(id) => assert_ne!(id, "C"),
            None => misses += 1,
        }
    }
    let share = misses as f64 / 20_000.0;
    assert!((0.57..=0.63).contains(&share), "miss share {share:.3} not near 0.60");
}

#[test]
fn missing_index_is_no_win() {
    let alg = build(8, &[("A", 1.0)], 5);
    assert_eq!(alg.draw(999, &ExcludeSet::new()), None);
}
