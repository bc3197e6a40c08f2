pub mod model;
pub mod repository;

pub use model::ExchangeRateDB;
pub use repository::FxRepository;
