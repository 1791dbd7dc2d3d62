//! HTTP handlers for restaurants, pizzas, and restaurant pizzas, plus the OpenAPI document.

pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;

use crate::error::AppError;
use crate::serializer::{
    PizzaSummary, RestaurantDetail, RestaurantPizzaDetail, RestaurantPizzaInRestaurant,
    RestaurantSummary,
};
use crate::service::RESTAURANT_NOT_FOUND;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Path ids are integers; anything else cannot name a restaurant.
/// Only plain ASCII digits are accepted; signs, whitespace, and overflow are not found.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    let not_found = || AppError::NotFound(RESTAURANT_NOT_FOUND.into());
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    id_str.parse().map_err(|_| not_found())
}

/// Body of `POST /restaurant_pizzas`. Documentation only; the handler validates raw JSON.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price in whole currency units, 1 to 30 inclusive
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorList {
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorWithDetails {
    pub error: String,
    pub details: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurants::list,
        restaurants::read,
        restaurants::delete,
        pizzas::list,
        restaurant_pizzas::create,
    ),
    components(schemas(
        RestaurantSummary,
        RestaurantDetail,
        RestaurantPizzaInRestaurant,
        PizzaSummary,
        RestaurantPizzaDetail,
        CreateRestaurantPizzaRequest,
        ErrorMessage,
        ErrorList,
        ErrorWithDetails,
    )),
    tags(
        (name = "restaurants", description = "Restaurants and their menus"),
        (name = "pizzas", description = "Pizza catalog"),
        (name = "restaurant_pizzas", description = "Priced menu entries")
    ),
    info(
        title = "Pizza Restaurants API",
        description = "Restaurants, pizzas, and the prices restaurants charge for them",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
