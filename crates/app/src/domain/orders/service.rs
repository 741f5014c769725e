//! Orders service.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::cart_total,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            data::PaymentVerification,
            errors::OrdersServiceError,
            reconcile::{Reconciliation, reconcile},
            records::{
                OrderDetails, OrderItemRecord, OrderUuid, PlacedOrder, VerificationOutcome,
                VerifiedPayment,
            },
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::OrderStatus,
        },
        users::records::UserUuid,
    },
    gateway::{CURRENCY, GatewayError, PaymentGateway, RemoteOrderRequest, to_minor_units},
};

/// Serialization conflicts are retried up to this many passes in total.
const VERIFY_ATTEMPTS: usize = 3;

pub struct PgOrdersService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    gateway_timeout: Duration,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>, gateway_timeout: Duration) -> Self {
        Self {
            db,
            gateway,
            gateway_timeout,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Fail-closed signature check: a timeout counts as an invalid signature.
    async fn signature_is_valid(&self, verification: &PaymentVerification) -> bool {
        match timeout(
            self.gateway_timeout,
            self.gateway.verify_signature(&verification.confirmation),
        )
        .await
        {
            Ok(valid) => valid,
            Err(_elapsed) => {
                tracing::warn!(
                    order_uuid = %verification.order,
                    gateway_order_id = %verification.confirmation.gateway_order_id,
                    "signature verification timed out"
                );

                false
            }
        }
    }

    /// One reconciliation pass in its own serializable transaction.
    ///
    /// A concurrent verification of the same order surfaces as `Conflict`; a
    /// fresh pass then sees the committed outcome.
    async fn reconcile_payment(
        &self,
        user: UserUuid,
        verification: &PaymentVerification,
        signature_valid: bool,
    ) -> Result<VerifiedPayment, OrdersServiceError> {
        let mut tx = self.db.begin_serializable_user_transaction(user).await?;

        let current = self
            .orders_repository
            .lock_order(&mut tx, verification.order, user)
            .await?;

        let confirmation = &verification.confirmation;

        match reconcile(current, confirmation, signature_valid)? {
            Reconciliation::AlreadyPaid(order) => {
                tx.commit().await?;

                tracing::debug!(order_uuid = %order.uuid, "payment already verified");

                Ok(VerifiedPayment {
                    order,
                    outcome: VerificationOutcome::AlreadyPaid,
                    cart_items_removed: 0,
                })
            }
            Reconciliation::MarkFailed(order) => {
                let order = self
                    .orders_repository
                    .record_payment(&mut tx, order.uuid, OrderStatus::Failed, confirmation)
                    .await?;

                tx.commit().await?;

                tracing::warn!(
                    order_uuid = %order.uuid,
                    user_uuid = %user,
                    gateway_order_id = %confirmation.gateway_order_id,
                    "payment signature invalid, order marked failed"
                );

                Err(OrdersServiceError::InvalidSignature)
            }
            Reconciliation::MarkPaid(order) => {
                let order = self
                    .orders_repository
                    .record_payment(&mut tx, order.uuid, OrderStatus::Paid, confirmation)
                    .await?;

                let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

                let cart_items_removed = self
                    .cart_items_repository
                    .delete_cart_items_for_order(&mut tx, cart.uuid, order.uuid)
                    .await?;

                tx.commit().await?;

                tracing::info!(
                    order_uuid = %order.uuid,
                    user_uuid = %user,
                    gateway_order_id = %confirmation.gateway_order_id,
                    cart_items_removed,
                    "payment verified, order paid"
                );

                Ok(VerifiedPayment {
                    order,
                    outcome: VerificationOutcome::Paid,
                    cart_items_removed,
                })
            }
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, user: UserUuid) -> Result<PlacedOrder, OrdersServiceError> {
        let mut tx = self.db.begin_serializable_user_transaction(user).await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let lines = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total_amount = cart_total(&lines);
        let amount_minor = to_minor_units(total_amount)?;

        let order = self
            .orders_repository
            .create_order(&mut tx, OrderUuid::new(), user, total_amount)
            .await?;

        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            let item = self
                .items_repository
                .create_order_item(&mut tx, order.uuid, line, line.unit_price())
                .await?;

            items.push(item);
        }

        let request = RemoteOrderRequest {
            amount_minor,
            currency: CURRENCY.to_string(),
            notes: BTreeMap::from([
                ("local_order_id".to_string(), order.uuid.to_string()),
                ("user".to_string(), user.to_string()),
            ]),
        };

        let remote = match timeout(self.gateway_timeout, self.gateway.create_remote_order(request))
            .await
        {
            Ok(Ok(remote)) => remote,
            Ok(Err(error)) => {
                tracing::warn!(
                    order_uuid = %order.uuid,
                    user_uuid = %user,
                    error = %error,
                    "remote order creation failed, discarding order"
                );

                // Dropping `tx` rolls back the order and its items.
                return Err(error.into());
            }
            Err(_elapsed) => {
                tracing::warn!(
                    order_uuid = %order.uuid,
                    user_uuid = %user,
                    "remote order creation timed out, discarding order"
                );

                return Err(GatewayError::Timeout.into());
            }
        };

        let order = self
            .orders_repository
            .set_gateway_order_id(&mut tx, order.uuid, &remote.id)
            .await?;

        if let Err(error) = tx.commit().await {
            tracing::warn!(
                order_uuid = %order.uuid,
                user_uuid = %user,
                gateway_order_id = %remote.id,
                error = %error,
                "order commit failed after remote order was created"
            );

            return Err(error.into());
        }

        tracing::info!(
            order_uuid = %order.uuid,
            user_uuid = %user,
            gateway_order_id = %remote.id,
            total_amount = %order.total_amount,
            "placed order"
        );

        Ok(PlacedOrder {
            order,
            items,
            gateway_order_id: remote.id,
            currency: CURRENCY.to_string(),
            gateway_raw_response: remote.raw,
        })
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderDetails>, OrdersServiceError> {
        let mut tx = self.db.begin_user_transaction(user).await?;

        let orders = self.orders_repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .items_repository
            .list_order_items(&mut tx, &uuids)
            .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            items_by_order.entry(item.order).or_default().push(item);
        }

        let details = orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.uuid).unwrap_or_default();

                OrderDetails { order, items }
            })
            .collect();

        Ok(details)
    }

    async fn verify_payment(
        &self,
        user: UserUuid,
        verification: PaymentVerification,
    ) -> Result<VerifiedPayment, OrdersServiceError> {
        let signature_valid = self.signature_is_valid(&verification).await;

        let mut attempt = 1;

        loop {
            match self
                .reconcile_payment(user, &verification, signature_valid)
                .await
            {
                Err(OrdersServiceError::Conflict) if attempt < VERIFY_ATTEMPTS => {
                    tracing::debug!(
                        order_uuid = %verification.order,
                        attempt,
                        "payment verification raced another, retrying"
                    );

                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Snapshot the user's cart into a pending order and open the remote order.
    ///
    /// The cart is left untouched. When the gateway fails nothing is persisted.
    async fn place_order(&self, user: UserUuid) -> Result<PlacedOrder, OrdersServiceError>;

    /// The user's orders with their items, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderDetails>, OrdersServiceError>;

    /// Reconcile a client-reported payment confirmation against a local order.
    async fn verify_payment(
        &self,
        user: UserUuid,
        verification: PaymentVerification,
    ) -> Result<VerifiedPayment, OrdersServiceError>;
}
