pub mod investments_model;
pub mod investments_traits;
pub mod pricing;

pub use investments_model::*;
pub use investments_traits::*;
pub use pricing::*;
