//! Rows of the three tables and the insert payloads for them.

use sqlx::FromRow;

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    /// Free-text, comma separated.
    pub ingredients: String,
}

/// Priced edge between a restaurant and a pizza.
#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct RestaurantPizza {
    pub id: i64,
    pub price: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
}

/// A menu entry of a restaurant together with its pizza, loaded in one join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub restaurant_pizza: RestaurantPizza,
    pub pizza: Pizza,
}

#[derive(Clone, Debug)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// Validated input for a new priced edge. Construct only after range and existence checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    pub price: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
}
