use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{self, AppState};
use crate::middleware::{basic_auth_middleware, expose_error_details};

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let mut resources = resource_routes();
    if state.config.security.require_basic_auth {
        resources = resources.route_layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ));
    }

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(auth_routes())
        .merge(resources);

    if state.config.server.expose_error_details {
        router = router.layer(middleware::from_fn(expose_error_details));
    }

    router
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/checkpassword", get(auth::check_password))
}

fn resource_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::{cart, order_items, orders, products, reviews, users};

    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        // Cart rows are keyed by product id
        .route("/cart", get(cart::list).post(cart::add))
        .route("/cart/:productId", put(cart::update).delete(cart::delete))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/:id",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        .route("/order-items", get(order_items::list).post(order_items::create))
        .route(
            "/order-items/:id",
            get(order_items::get)
                .put(order_items::update)
                .delete(order_items::delete),
        )
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/reviews/:id",
            get(reviews::get).put(reviews::update).delete(reviews::delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(security.cors_allow_credentials)
}
