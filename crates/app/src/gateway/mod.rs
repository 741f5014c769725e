//! Payment Gateway

mod errors;
mod models;
mod razorpay;
mod service;
mod signature;

pub use errors::*;
pub use models::*;
pub use razorpay::{DEFAULT_API_BASE, RazorpayConfig, RazorpayGateway};
pub use service::*;
pub use signature::*;
