pub mod model;
pub mod repository;

pub use model::{InvestmentTransactionDB, SecurityDB, SecurityPriceDB};
pub use repository::InvestmentRepository;
