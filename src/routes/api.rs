//! Resource routes.

use crate::handlers::{pizzas, restaurant_pizzas, restaurants};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(restaurants::list))
        .route(
            "/restaurants/:id",
            get(restaurants::read).delete(restaurants::delete),
        )
        .route("/pizzas", get(pizzas::list))
        .route("/restaurant_pizzas", post(restaurant_pizzas::create))
        .with_state(state)
}
