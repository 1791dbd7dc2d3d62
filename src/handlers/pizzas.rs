use crate::error::AppError;
use crate::serializer::PizzaSummary;
use crate::service::CatalogService;
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas, compact", body = [PizzaSummary]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PizzaSummary>>, AppError> {
    Ok(Json(CatalogService::list_pizzas(&state.store).await?))
}
