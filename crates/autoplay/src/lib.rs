//! Unattended opponents over the core game API: three strategy tiers,
//! a tunable parametric variant, and a match simulator.

mod casual;
mod config;
mod error;
mod eval;
mod expert;
mod parametric;
mod simulator;
mod standard;
mod strategy;
mod trace;

pub use casual::*;
pub use config::*;
pub use error::*;
pub use eval::*;
pub use expert::*;
pub use parametric::*;
pub use simulator::*;
pub use standard::*;
pub use strategy::*;
pub use trace::*;
