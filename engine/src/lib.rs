// Engine library root
// Price-derived indicators, return and risk analytics, and the data and
// settings layers feeding them.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod performance;
pub mod services;

pub use error::EngineError;
