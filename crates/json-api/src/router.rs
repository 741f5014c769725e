//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products, wishlists};

/// Every route here requires a bearer token.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("remove").post(carts::remove::handler))
                .push(Router::with_path("clear").post(carts::clear::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("place").post(orders::place::handler))
                .push(Router::with_path("verify-payment").post(orders::verify_payment::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("wishlist")
                .get(wishlists::index::handler)
                .push(Router::with_path("add").post(wishlists::add::handler))
                .push(Router::with_path("remove").post(wishlists::remove::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::TestClient,
        trailing_slash::remove_slash,
    };
    use testresult::TestResult;

    use storefront_app::{auth::AuthServiceError, domain::carts::MockCartsService};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, make_cart};

    use super::*;

    fn make_service(services: MockServices) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(services.into_state()))
                .push(app_router()),
        )
        .hoop(remove_slash())
    }

    #[tokio::test]
    async fn test_routes_require_bearer_token() -> TestResult {
        let service = make_service(MockServices::default());

        for (method, path) in [
            ("GET", "/cart"),
            ("POST", "/cart/add"),
            ("POST", "/orders/place"),
            ("POST", "/orders/verify-payment"),
            ("GET", "/products"),
            ("GET", "/wishlist"),
        ] {
            let url = format!("http://example.com{path}");

            let client = if method == "GET" {
                TestClient::get(url)
            } else {
                TestClient::post(url)
            };

            let res = client.send(&service).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "{method} {path} should require a token"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_trailing_slash_reaches_cart() -> TestResult {
        let mut services = MockServices::default();

        services
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(TEST_USER_UUID));

        let mut carts = MockCartsService::new();

        carts
            .expect_get_or_create_cart()
            .once()
            .return_once(|_| Ok(make_cart(Vec::new())));

        services.carts = carts;

        let res = TestClient::get("http://example.com/cart/")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_user_is_forbidden_everywhere() -> TestResult {
        let mut services = MockServices::default();

        services
            .auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Inactive));

        let res = TestClient::post("http://example.com/orders/place")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
