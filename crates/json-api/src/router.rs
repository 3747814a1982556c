//! API Router

use salvo::Router;

use crate::{auth, carts, healthcheck, orders, products};

/// Every route under `/api`. Cart, order and admin routes require a bearer token.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("refresh").post(auth::refresh::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("categories").get(products::categories::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart").get(carts::get::handler).push(
                        Router::with_path("items")
                            .post(carts::items::create::handler)
                            .push(
                                Router::with_path("{product}")
                                    .patch(carts::items::update::handler)
                                    .delete(carts::items::delete::handler),
                            ),
                    ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("admin/products/{product}").put(products::save::handler),
                ),
        )
}
