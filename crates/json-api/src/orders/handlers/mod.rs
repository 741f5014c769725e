//! Order Handlers

pub(crate) mod index;
pub(crate) mod place;
pub(crate) mod verify_payment;
