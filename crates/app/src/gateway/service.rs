//! Payment gateway interface.

use async_trait::async_trait;
use mockall::automock;

use crate::gateway::{GatewayError, PaymentConfirmation, RemoteOrder, RemoteOrderRequest};

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a remote order the client can pay against.
    async fn create_remote_order(
        &self,
        request: RemoteOrderRequest,
    ) -> Result<RemoteOrder, GatewayError>;

    /// Check a payment confirmation signature. Never mutates remote state.
    async fn verify_signature(&self, confirmation: &PaymentConfirmation) -> bool;
}
