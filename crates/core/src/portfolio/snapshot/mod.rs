pub mod balance_calculator;
pub mod holdings_calculator;
pub mod snapshot_model;
pub mod snapshot_traits;

pub use balance_calculator::*;
pub use holdings_calculator::*;
pub use snapshot_model::*;
pub use snapshot_traits::*;

#[cfg(test)]
mod holdings_calculator_tests;
