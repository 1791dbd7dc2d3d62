use crate::error::AppError;
use crate::handlers::{parse_id, ErrorMessage, ErrorWithDetails};
use crate::serializer::{RestaurantDetail, RestaurantSummary};
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants, compact", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    Ok(Json(CatalogService::list_restaurants(&state.store).await?))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant with its menu", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ErrorMessage),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(CatalogService::read_restaurant(&state.store, id).await?))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Restaurant and its menu entries deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorMessage),
        (status = 500, description = "Delete failed and was rolled back", body = ErrorWithDetails),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    CatalogService::delete_restaurant(&state.store, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
