use crate::error::AppError;
use crate::handlers::{CreateRestaurantPizzaRequest, ErrorList, ErrorWithDetails};
use crate::serializer::RestaurantPizzaDetail;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Menu entry created", body = RestaurantPizzaDetail),
        (status = 400, description = "Missing fields, bad types, or price outside 1..=30", body = ErrorList),
        (status = 404, description = "Pizza or restaurant not found", body = ErrorList),
        (status = 500, description = "Insert failed and was rolled back", body = ErrorWithDetails),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaDetail>), AppError> {
    let Json(body) = payload?;
    let created = CatalogService::create_restaurant_pizza(&state.store, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
