pub mod net_worth_model;
pub mod net_worth_service;
pub mod net_worth_traits;

pub use net_worth_model::*;
pub use net_worth_service::NetWorthService;
pub use net_worth_traits::*;
