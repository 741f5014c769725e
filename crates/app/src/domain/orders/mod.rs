//! Orders

pub mod data;
pub mod errors;
pub mod reconcile;
pub mod records;
mod repositories;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
