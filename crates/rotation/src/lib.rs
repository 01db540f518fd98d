//! Deterministic duty-rotation algorithms.
//!
//! This crate provides:
//! - modular round-robin assignment against a fixed epoch (`assigner`)
//! - balanced-cycle schedule generation (`generator`)
//! - rotation-fairness analysis of a generated table (`balance`)

pub mod assigner;
pub mod balance;
pub mod generator;

pub use assigner::{assign, bug_epoch};
pub use balance::{check, BalanceReport, PersonStats};
pub use generator::{generate, MIN_ROSTER_SIZE};
