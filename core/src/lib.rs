//! Weighted-random award draws for configured lottery strategies.
//!
//! Layering, leaves first:
//!   index      — per-strategy bucket tables (Fibonacci-hashed)
//!   algorithm  — dynamic and precomputed draw variants
//!   registry   — strategy mode → algorithm, fixed at start-up
//!   draw       — DrawEngine::execute_draw, the public entry point
//!
//! Persistence sits behind repository::StrategyRepository;
//! store::LotteryStore is the SQLite implementation.

pub mod algorithm;
pub mod config;
pub mod draw;
pub mod error;
pub mod exclusion;
pub mod index;
pub mod model;
pub mod registry;
pub mod repository;
pub mod rng;
pub mod store;
pub mod types;
