//! Seed-data configuration tests.

use lottery_core::{
    config::{DetailSeed, LotteryConfig},
    error::LotteryError,
};

#[test]
fn default_test_config_is_valid() {
    LotteryConfig::default_test().validate().expect("default test config");
}

#[test]
fn shipped_data_directory_loads() {
    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
    let config = LotteryConfig::load(data_dir).expect("load data/strategies.json");
    assert!(config.strategy(7).is_some(), "demo strategy 7 missing");
    assert!(config.strategy(8).is_some(), "demo strategy 8 missing");
}

#[test]
fn missing_data_directory_is_an_error() {
    assert!(LotteryConfig::load("/definitely/not/here").is_err());
}

#[test]
fn out_of_range_rate_is_rejected() {
    let mut config = LotteryConfig::default_test();
    config.strategies[0].details[0].award_rate = 1.5;
    assert!(matches!(
        config.validate(),
        Err(LotteryError::InvalidRate { ref award_id, .. }) if award_id == "A"
    ));
}

#[test]
fn unknown_mode_code_is_rejected() {
    let mut config = LotteryConfig::default_test();
    config.strategies[0].strategy_mode = 0;
    assert!(matches!(
        config.validate(),
        Err(LotteryError::UnknownStrategyMode { code: 0 })
    ));
}

#[test]
fn detail_for_unknown_award_is_rejected() {
    let mut config = LotteryConfig::default_test();
    config.strategies[0].details.push(DetailSeed {
        award_id:            "ZZZ".into(),
        award_count:         1,
        award_surplus_count: 1,
        award_rate:          0.0,
    });
    assert!(config.validate().is_err());
}

#[test]
fn surplus_above_count_is_rejected() {
    let mut config = LotteryConfig::default_test();
    config.strategies[0].details[0].award_surplus_count = config.strategies[0].details[0].award_count + 1;
    assert!(config.validate().is_err());
}

#[test]
fn duplicate_strategy_id_is_rejected() {
    let mut config = LotteryConfig::default_test();
    let copy = config.strategies[0].clone();
    config.strategies.push(copy);
    assert!(config.validate().is_err());
}
