//! Payment signature computation and verification.
//!
//! The provider signs `"{order_id}|{payment_id}"` with HMAC-SHA256 keyed by the
//! account's key secret and sends the digest as lowercase hex.

use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

use crate::gateway::PaymentConfirmation;

type HmacSha256 = Hmac<Sha256>;

fn signing_mac(secret: &str, order_id: &str, payment_id: &str) -> Result<HmacSha256, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;

    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    Ok(mac)
}

/// Hex signature the provider would send for this order and payment.
///
/// # Errors
///
/// Returns an error when the secret cannot key the MAC.
pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> Result<String, InvalidLength> {
    let mac = signing_mac(secret, order_id, payment_id)?;

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a payment confirmation. Anything that cannot be
/// decoded or keyed is reported as invalid.
#[must_use]
pub fn verify_payment_signature(secret: &str, confirmation: &PaymentConfirmation) -> bool {
    let Ok(expected) = hex::decode(confirmation.signature.trim()) else {
        return false;
    };

    let Ok(mac) = signing_mac(
        secret,
        &confirmation.gateway_order_id,
        &confirmation.gateway_payment_id,
    ) else {
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}
