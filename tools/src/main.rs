//! draw-runner: headless draw runner for the lottery engine.
//!
//! Usage:
//!   draw-runner --strategy 7 --draws 1000 --db lottery.db
//!   draw-runner --strategy 8 --draws 500 --seed 12345 --json
//!
//! Each WIN is followed by a stock deduction, the way the business
//! layer sequences it. A lost deduction counts as a no-win; the draw
//! is not retried.

use anyhow::Result;
use chrono::Utc;
use lottery_core::{
    config::LotteryConfig,
    draw::DrawEngine,
    model::DrawRequest,
    rng::{PointSource, SecurePoints, SeededPoints},
    store::LotteryStore,
    types::StrategyId,
};
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

#[derive(serde::Serialize)]
struct RunSummary {
    strategy_id:      StrategyId,
    draws:            u64,
    wins:             BTreeMap<String, u64>,
    no_wins:          u64,
    lost_deductions:  u64,
    remaining_stock:  BTreeMap<String, i64>,
    point_source:     &'static str,
    elapsed_ms:       i64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let strategy_id = parse_arg(&args, "--strategy", 7 as StrategyId);
    let draws = parse_arg(&args, "--draws", 1_000u64);
    let seed: Option<u64> = args
        .windows(2)
        .find(|w| w[0] == "--seed")
        .and_then(|w| w[1].parse().ok());
    let json = args.iter().any(|a| a == "--json");
    let deduct = !args.iter().any(|a| a == "--no-deduct");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    if !json {
        println!("Lottery draw-runner");
        println!("  strategy:  {strategy_id}");
        println!("  draws:     {draws}");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!("  seed:      {}", seed.map_or("os".to_string(), |s| s.to_string()));
        println!();
    }

    let store = LotteryStore::open(db)?;
    store.migrate()?;
    let config = LotteryConfig::load(data_dir)?;
    store.seed(&config)?;
    let store = Arc::new(store);

    let points: Arc<dyn PointSource> = match seed {
        Some(s) => Arc::new(SeededPoints::new(s)),
        None => Arc::new(SecurePoints),
    };
    let point_source = points.name();
    let engine = DrawEngine::build_with_points(store.clone(), points)?;

    let started = Utc::now();
    let mut wins: BTreeMap<String, u64> = BTreeMap::new();
    let mut no_wins = 0u64;
    let mut lost_deductions = 0u64;

    for _ in 0..draws {
        let user_id = uuid::Uuid::new_v4().to_string();
        let result = engine.execute_draw(&DrawRequest::new(user_id, strategy_id))?;
        let Some(award_id) = result.award_id() else {
            no_wins += 1;
            continue;
        };
        if deduct && !engine.deduct_stock(strategy_id, award_id)? {
            lost_deductions += 1;
            continue;
        }
        *wins.entry(award_id.to_string()).or_insert(0) += 1;
    }

    let mut remaining_stock = BTreeMap::new();
    if let Some(strategy) = config.strategy(strategy_id) {
        for d in &strategy.details {
            if let Some(count) = store.surplus_count(strategy_id, &d.award_id)? {
                remaining_stock.insert(d.award_id.clone(), count);
            }
        }
    } else {
        log::warn!("Strategy {strategy_id} is not in {data_dir}/strategies.json");
    }

    let summary = RunSummary {
        strategy_id,
        draws,
        wins,
        no_wins,
        lost_deductions,
        remaining_stock,
        point_source,
        elapsed_ms: (Utc::now() - started).num_milliseconds(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  strategy:         {}", summary.strategy_id);
    println!("  draws:            {}", summary.draws);
    println!("  no wins:          {}", summary.no_wins);
    println!("  lost deductions:  {}", summary.lost_deductions);
    println!("  point source:     {}", summary.point_source);
    println!("  elapsed:          {} ms", summary.elapsed_ms);

    println!();
    println!("=== AWARDS ===");
    if summary.wins.is_empty() {
        println!("  (No awards won)");
    }
    for (award_id, count) in &summary.wins {
        let share = *count as f64 / summary.draws.max(1) as f64 * 100.0;
        let left = summary
            .remaining_stock
            .get(award_id)
            .map_or("?".to_string(), |c| c.to_string());
        println!("  {award_id:<8} won: {count:>8} ({share:>5.1}%)  stock left: {left}");
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
