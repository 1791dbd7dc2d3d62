//! Fixture data for a fresh store.

use crate::error::AppError;
use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::store::Store;

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const MENU: &[(usize, usize, i64)] = &[(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Clear every table and insert the fixture set.
pub async fn seed(store: &Store) -> Result<SeedSummary, AppError> {
    store.clear().await?;

    let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
    for (name, address) in RESTAURANTS {
        let new = NewRestaurant {
            name: (*name).into(),
            address: (*address).into(),
        };
        restaurants.push(store.insert_restaurant(&new).await?);
    }

    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    for (name, ingredients) in PIZZAS {
        let new = NewPizza {
            name: (*name).into(),
            ingredients: (*ingredients).into(),
        };
        pizzas.push(store.insert_pizza(&new).await?);
    }

    for &(r, p, price) in MENU {
        store
            .insert_restaurant_pizza(NewRestaurantPizza {
                price,
                restaurant_id: restaurants[r].id,
                pizza_id: pizzas[p].id,
            })
            .await?;
    }

    let summary = SeedSummary {
        restaurants: restaurants.len(),
        pizzas: pizzas.len(),
        restaurant_pizzas: MENU.len(),
    };
    tracing::info!(?summary, "seeded");
    Ok(summary)
}
