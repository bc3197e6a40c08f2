pub mod model;
pub mod repository;

pub use model::{TransactionDB, TransactionSplitDB};
pub use repository::TransactionRepository;
