pub mod net_worth;
pub mod recalculation;
pub mod snapshot;
