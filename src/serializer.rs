//! Response views. Each view fixes the field set for one endpoint; nested relations are embedded
//! explicitly and never carry a back-reference to their parent.

use crate::models::{MenuEntry, Pizza, Restaurant, RestaurantPizza};
use serde::Serialize;
use utoipa::ToSchema;

/// Compact restaurant: `id`, `name`, `address`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// Compact pizza: `id`, `name`, `ingredients`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct PizzaSummary {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}

/// Menu entry as embedded in a restaurant: no `restaurant` back-reference.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantPizzaInRestaurant {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaInRestaurant>,
}

/// A created edge with both endpoints embedded as summaries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantPizzaDetail {
    pub id: i64,
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

pub fn restaurant_summary(r: &Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        id: r.id,
        name: r.name.clone(),
        address: r.address.clone(),
    }
}

pub fn pizza_summary(p: &Pizza) -> PizzaSummary {
    PizzaSummary {
        id: p.id,
        name: p.name.clone(),
        ingredients: p.ingredients.clone(),
    }
}

pub fn restaurant_detail(r: &Restaurant, menu: &[MenuEntry]) -> RestaurantDetail {
    RestaurantDetail {
        id: r.id,
        name: r.name.clone(),
        address: r.address.clone(),
        restaurant_pizzas: menu
            .iter()
            .map(|entry| {
                let rp = &entry.restaurant_pizza;
                RestaurantPizzaInRestaurant {
                    id: rp.id,
                    price: rp.price,
                    pizza_id: rp.pizza_id,
                    restaurant_id: rp.restaurant_id,
                    pizza: pizza_summary(&entry.pizza),
                }
            })
            .collect(),
    }
}

pub fn restaurant_pizza_detail(
    rp: &RestaurantPizza,
    pizza: &Pizza,
    restaurant: &Restaurant,
) -> RestaurantPizzaDetail {
    RestaurantPizzaDetail {
        id: rp.id,
        price: rp.price,
        pizza_id: rp.pizza_id,
        restaurant_id: rp.restaurant_id,
        pizza: pizza_summary(pizza),
        restaurant: restaurant_summary(restaurant),
    }
}
