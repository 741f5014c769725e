//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{Cart, CartItemRecord, CartItemUuid, CartUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            status::OrderStatus,
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::records::UserUuid,
        wishlists::MockWishlistsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. Any call without a matching expectation panics.
#[derive(Default)]
pub(crate) struct MockServices {
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub products: MockProductsService,
    pub wishlists: MockWishlistsService,
    pub auth: MockAuthService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            products: Arc::new(self.products),
            wishlists: Arc::new(self.wishlists),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as the authenticated test user.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    MockServices {
        carts,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    MockServices {
        orders,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    MockServices {
        products,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn wishlists_service(wishlists: MockWishlistsService, route: Router) -> Service {
    MockServices {
        wishlists,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn make_product(name: &str, price: Decimal) -> ProductRecord {
    let now = Timestamp::now();

    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: None,
        price,
        is_available: true,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_cart_item(qty: u32, price_at_add: Decimal) -> CartItemRecord {
    let now = Timestamp::now();

    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart: CartUuid::new(),
        product: ProductUuid::new(),
        product_name: "Test Product".to_string(),
        variation: None,
        qty,
        price_at_add: Some(price_at_add),
        current_price: price_at_add,
        is_available: true,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_cart(items: Vec<CartItemRecord>) -> Cart {
    let now = Timestamp::now();

    Cart {
        uuid: CartUuid::new(),
        user: TEST_USER_UUID,
        items,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_order(status: OrderStatus, total_amount: Decimal) -> OrderRecord {
    let now = Timestamp::now();

    OrderRecord {
        uuid: OrderUuid::new(),
        user: TEST_USER_UUID,
        total_amount,
        status,
        gateway_order_id: Some("order_test".to_string()),
        gateway_payment_id: None,
        gateway_signature: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_order_item(order: OrderUuid, qty: u32, price_at_order: Decimal) -> OrderItemRecord {
    OrderItemRecord {
        uuid: OrderItemUuid::new(),
        order,
        product: ProductUuid::new(),
        product_name: "Test Product".to_string(),
        variation: None,
        qty,
        price_at_order,
    }
}
