//! Algorithm registry tests — start-up validation and lookup.

use lottery_core::{
    algorithm::DrawAlgorithm,
    error::LotteryError,
    index::ProbabilityIndex,
    model::StrategyMode,
    registry::AlgorithmRegistry,
    rng::{PointSource, SecurePoints},
};
use std::sync::Arc;

fn points() -> Arc<dyn PointSource> {
    Arc::new(SecurePoints)
}

#[test]
fn standard_registry_serves_every_mode() {
    let registry = AlgorithmRegistry::standard(Arc::new(ProbabilityIndex::new()), points())
        .expect("standard registry");
    for mode in StrategyMode::ALL {
        assert_eq!(registry.get(mode).mode(), mode);
    }
    assert_eq!(registry.get_by_code(1).expect("code 1").mode(), StrategyMode::Dynamic);
    assert_eq!(registry.get_by_code(2).expect("code 2").mode(), StrategyMode::Precomputed);
}

#[test]
fn missing_mode_fails_at_init() {
    let result = AlgorithmRegistry::init([DrawAlgorithm::dynamic(points())]);
    match result {
        Err(LotteryError::MissingAlgorithm { mode }) => assert_eq!(mode, "precomputed"),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("registry without a precomputed algorithm was accepted"),
    }
}

#[test]
fn duplicate_mode_fails_at_init() {
    let result = AlgorithmRegistry::init([
        DrawAlgorithm::dynamic(points()),
        DrawAlgorithm::dynamic(points()),
        DrawAlgorithm::precomputed(Arc::new(ProbabilityIndex::new()), points()),
    ]);
    assert!(
        matches!(result, Err(LotteryError::DuplicateAlgorithm { ref mode }) if mode == "dynamic"),
        "duplicate dynamic registration was not rejected"
    );
}

#[test]
fn unknown_code_is_a_configuration_error() {
    let registry = AlgorithmRegistry::standard(Arc::new(ProbabilityIndex::new()), points())
        .expect("standard registry");
    assert!(matches!(
        registry.get_by_code(3),
        Err(LotteryError::UnknownStrategyMode { code: 3 })
    ));
}
