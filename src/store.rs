//! SQLite-backed store for restaurants, pizzas, and their priced edges.
//! Every write runs in its own transaction, rolled back before the error is returned.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use crate::models::{
    MenuEntry, NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::str::FromStr;

/// Result of creating a menu entry whose references are checked in the same transaction.
#[derive(Debug)]
pub enum MenuInsert {
    Created {
        restaurant_pizza: RestaurantPizza,
        pizza: Pizza,
        restaurant: Restaurant,
    },
    PizzaMissing,
    RestaurantMissing,
}

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct MenuRow {
    id: i64,
    price: i64,
    restaurant_id: i64,
    pizza_id: i64,
    pizza_name: String,
    pizza_ingredients: String,
}

impl From<MenuRow> for MenuEntry {
    fn from(row: MenuRow) -> Self {
        MenuEntry {
            restaurant_pizza: RestaurantPizza {
                id: row.id,
                price: row.price,
                restaurant_id: row.restaurant_id,
                pizza_id: row.pizza_id,
            },
            pizza: Pizza {
                id: row.pizza_id,
                name: row.pizza_name,
                ingredients: row.pizza_ingredients,
            },
        }
    }
}

/// Commit on success, roll back on failure. A failed rollback is logged; the original error wins.
async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, sqlx::Error>,
) -> Result<T, sqlx::Error> {
    match result {
        Ok(v) => {
            tx.commit().await?;
            Ok(v)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                tracing::warn!(error = %rb, "rollback failed");
            }
            Err(e)
        }
    }
}

/// Delete the edges pointing at a parent row, then the parent. Returns whether the parent existed.
async fn cascade_delete(
    conn: &mut SqliteConnection,
    edges_sql: &str,
    parent_sql: &str,
    id: i64,
) -> Result<bool, sqlx::Error> {
    tracing::debug!(sql = %edges_sql, id, "query (tx)");
    let edges = sqlx::query(edges_sql)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    tracing::debug!(sql = %parent_sql, id, "query (tx)");
    let parents = sqlx::query(parent_sql)
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    tracing::debug!(id, edges, parents, "cascade delete");
    Ok(parents > 0)
}

async fn create_menu_entry_tx(
    conn: &mut SqliteConnection,
    new: NewRestaurantPizza,
) -> Result<MenuInsert, sqlx::Error> {
    let pizza = sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas WHERE id = ?")
        .bind(new.pizza_id)
        .fetch_optional(&mut *conn)
        .await?;
    let restaurant =
        sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants WHERE id = ?")
            .bind(new.restaurant_id)
            .fetch_optional(&mut *conn)
            .await?;
    let Some(pizza) = pizza else {
        return Ok(MenuInsert::PizzaMissing);
    };
    let Some(restaurant) = restaurant else {
        return Ok(MenuInsert::RestaurantMissing);
    };
    tracing::debug!(?new, "insert restaurant_pizza (tx)");
    let restaurant_pizza = sqlx::query_as::<_, RestaurantPizza>(
        r#"
        INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id)
        VALUES (?, ?, ?)
        RETURNING id, price, restaurant_id, pizza_id
        "#,
    )
    .bind(new.price)
    .bind(new.restaurant_id)
    .bind(new.pizza_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(MenuInsert::Created {
        restaurant_pizza,
        pizza,
        restaurant,
    })
}

impl Store {
    /// Open a pool for the configured url, creating the database file if missing.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(ConfigError::DatabaseUrl)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Store { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_restaurant(&self, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>("SELECT id, name, address FROM restaurants WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_pizzas(&self) -> Result<Vec<Pizza>, sqlx::Error> {
        sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get_pizza(&self, id: i64) -> Result<Option<Pizza>, sqlx::Error> {
        sqlx::query_as::<_, Pizza>("SELECT id, name, ingredients FROM pizzas WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_restaurant_pizzas(&self) -> Result<Vec<RestaurantPizza>, sqlx::Error> {
        sqlx::query_as::<_, RestaurantPizza>(
            "SELECT id, price, restaurant_id, pizza_id FROM restaurant_pizzas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Edges of one restaurant joined with their pizza, in insertion order.
    pub async fn menu_for_restaurant(
        &self,
        restaurant_id: i64,
    ) -> Result<Vec<MenuEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT rp.id, rp.price, rp.restaurant_id, rp.pizza_id,
                   p.name AS pizza_name, p.ingredients AS pizza_ingredients
            FROM restaurant_pizzas rp
            JOIN pizzas p ON p.id = rp.pizza_id
            WHERE rp.restaurant_id = ?
            ORDER BY rp.id
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(MenuEntry::from).collect())
    }

    pub async fn insert_restaurant(&self, new: &NewRestaurant) -> Result<Restaurant, sqlx::Error> {
        sqlx::query_as::<_, Restaurant>(
            "INSERT INTO restaurants (name, address) VALUES (?, ?) RETURNING id, name, address",
        )
        .bind(&new.name)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn insert_pizza(&self, new: &NewPizza) -> Result<Pizza, sqlx::Error> {
        sqlx::query_as::<_, Pizza>(
            "INSERT INTO pizzas (name, ingredients) VALUES (?, ?) RETURNING id, name, ingredients",
        )
        .bind(&new.name)
        .bind(&new.ingredients)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn insert_restaurant_pizza(
        &self,
        new: NewRestaurantPizza,
    ) -> Result<RestaurantPizza, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(?new, "insert restaurant_pizza (tx)");
        let result = sqlx::query_as::<_, RestaurantPizza>(
            r#"
            INSERT INTO restaurant_pizzas (price, restaurant_id, pizza_id)
            VALUES (?, ?, ?)
            RETURNING id, price, restaurant_id, pizza_id
            "#,
        )
        .bind(new.price)
        .bind(new.restaurant_id)
        .bind(new.pizza_id)
        .fetch_one(&mut *tx)
        .await;
        finish(tx, result).await
    }

    /// Look up the pizza and restaurant, then insert the edge, all in one transaction.
    pub async fn create_menu_entry(
        &self,
        new: NewRestaurantPizza,
    ) -> Result<MenuInsert, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = create_menu_entry_tx(&mut *tx, new).await;
        finish(tx, result).await
    }

    /// Delete a restaurant and every edge referencing it. `Ok(false)` when no such restaurant.
    pub async fn delete_restaurant(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = cascade_delete(
            &mut *tx,
            "DELETE FROM restaurant_pizzas WHERE restaurant_id = ?",
            "DELETE FROM restaurants WHERE id = ?",
            id,
        )
        .await;
        finish(tx, result).await
    }

    /// Delete a pizza and every edge referencing it. `Ok(false)` when no such pizza.
    pub async fn delete_pizza(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = cascade_delete(
            &mut *tx,
            "DELETE FROM restaurant_pizzas WHERE pizza_id = ?",
            "DELETE FROM pizzas WHERE id = ?",
            id,
        )
        .await;
        finish(tx, result).await
    }

    /// Remove all rows and restart id generation. Used before seeding.
    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = async {
            for sql in [
                "DELETE FROM restaurant_pizzas",
                "DELETE FROM restaurants",
                "DELETE FROM pizzas",
                "DELETE FROM sqlite_sequence WHERE name IN ('restaurant_pizzas', 'restaurants', 'pizzas')",
            ] {
                sqlx::query(sql).execute(&mut *tx).await?;
            }
            Ok::<(), sqlx::Error>(())
        }
        .await;
        finish(tx, result).await
    }
}
