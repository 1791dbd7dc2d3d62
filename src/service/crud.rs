//! Endpoint operations over the store: load, validate, write, and shape views.

use crate::error::AppError;
use crate::serializer::{
    pizza_summary, restaurant_detail, restaurant_pizza_detail, restaurant_summary, PizzaSummary,
    RestaurantDetail, RestaurantPizzaDetail, RestaurantSummary,
};
use crate::service::RequestValidator;
use crate::store::{MenuInsert, Store};
use serde_json::Value;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const PIZZA_NOT_FOUND: &str = "Pizza not found";

pub struct CatalogService;

impl CatalogService {
    pub async fn list_restaurants(store: &Store) -> Result<Vec<RestaurantSummary>, AppError> {
        let rows = store.list_restaurants().await?;
        Ok(rows.iter().map(restaurant_summary).collect())
    }

    pub async fn read_restaurant(store: &Store, id: i64) -> Result<RestaurantDetail, AppError> {
        let restaurant = store
            .get_restaurant(id)
            .await?
            .ok_or_else(|| AppError::NotFound(RESTAURANT_NOT_FOUND.into()))?;
        let menu = store.menu_for_restaurant(id).await?;
        Ok(restaurant_detail(&restaurant, &menu))
    }

    /// Delete a restaurant with its menu entries in one transaction.
    pub async fn delete_restaurant(store: &Store, id: i64) -> Result<(), AppError> {
        let deleted = store
            .delete_restaurant(id)
            .await
            .map_err(AppError::persistence("Failed to delete restaurant"))?;
        if !deleted {
            return Err(AppError::NotFound(RESTAURANT_NOT_FOUND.into()));
        }
        tracing::info!(restaurant_id = id, "restaurant deleted");
        Ok(())
    }

    pub async fn list_pizzas(store: &Store) -> Result<Vec<PizzaSummary>, AppError> {
        let rows = store.list_pizzas().await?;
        Ok(rows.iter().map(pizza_summary).collect())
    }

    /// Validate fields, then check the pizza and the restaurant exist and insert, in one transaction.
    pub async fn create_restaurant_pizza(
        store: &Store,
        body: &Value,
    ) -> Result<RestaurantPizzaDetail, AppError> {
        let new = RequestValidator::restaurant_pizza(body)?;
        let outcome = store
            .create_menu_entry(new)
            .await
            .map_err(AppError::persistence("Failed to create restaurant pizza"))?;
        let (created, pizza, restaurant) = match outcome {
            MenuInsert::Created {
                restaurant_pizza,
                pizza,
                restaurant,
            } => (restaurant_pizza, pizza, restaurant),
            MenuInsert::PizzaMissing => {
                return Err(AppError::MissingReference(PIZZA_NOT_FOUND.into()))
            }
            MenuInsert::RestaurantMissing => {
                return Err(AppError::MissingReference(RESTAURANT_NOT_FOUND.into()))
            }
        };
        tracing::info!(
            restaurant_pizza_id = created.id,
            restaurant_id = created.restaurant_id,
            pizza_id = created.pizza_id,
            "restaurant pizza created"
        );
        Ok(restaurant_pizza_detail(&created, &pizza, &restaurant))
    }
}
