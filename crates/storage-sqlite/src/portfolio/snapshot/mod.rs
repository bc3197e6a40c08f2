pub mod model;
pub mod repository;

pub use model::MonthlyAccountBalanceDB;
pub use repository::SnapshotRepository;
