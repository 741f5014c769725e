//! Wishlist Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductRecord, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistItemRecord>;

/// Wishlist Item Record, with the product it points at.
#[derive(Debug, Clone)]
pub struct WishlistItemRecord {
    pub uuid: WishlistItemUuid,
    pub user: UserUuid,
    pub product: ProductRecord,
    pub added_at: Timestamp,
}

/// Whether an add created a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAddOutcome {
    Added,
    AlreadyPresent,
}
