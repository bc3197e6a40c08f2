pub mod recalculation_service;
pub mod recalculation_traits;

pub use recalculation_service::RecalculationService;
pub use recalculation_traits::*;

#[cfg(test)]
mod recalculation_service_tests;
