use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{
        Holding, HoldingUpdate, HoldingValuation, NewHolding, PortfolioValuation,
        StandardDeviation, StandardDeviationHistory, StandardDeviationUpdate,
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/crypto",
    request_body = NewHolding,
    responses(
        (status = 200, body = Holding),
        (status = 400, description = "Unsupported coin or invalid amount"),
        (status = 403, description = "Holding already created"),
        (status = 503, description = "Price provider unavailable")
    )
)]
pub async fn create_holding(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewHolding>,
) -> ApiResult<Json<Holding>> {
    let created = state
        .holding_service
        .create_holding(payload.into())
        .await?;
    Ok(Json(Holding::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/v1/crypto",
    responses(
        (status = 200, body = PortfolioValuation),
        (status = 404, description = "No holdings")
    )
)]
pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioValuation>> {
    let portfolio = state.holding_service.get_portfolio_valuation().await?;
    Ok(Json(portfolio.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/crypto/{id}",
    params(("id" = String, Path, description = "Holding id")),
    responses(
        (status = 200, body = HoldingValuation),
        (status = 404, description = "Unknown holding")
    )
)]
pub async fn get_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HoldingValuation>> {
    let valuation = state.holding_service.get_holding_valuation(&id).await?;
    Ok(Json(valuation.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/crypto/{id}",
    params(("id" = String, Path, description = "Holding id")),
    request_body = HoldingUpdate,
    responses(
        (status = 200, body = Holding),
        (status = 400, description = "Invalid amount or negative result"),
        (status = 404, description = "Unknown holding")
    )
)]
pub async fn update_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<HoldingUpdate>,
) -> ApiResult<Json<Holding>> {
    let updated = state
        .holding_service
        .update_holding(&id, payload.into())
        .await?;
    Ok(Json(Holding::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/crypto/{id}",
    params(("id" = String, Path, description = "Holding id")),
    responses(
        (status = 200, body = Holding),
        (status = 404, description = "Unknown holding")
    )
)]
pub async fn delete_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Holding>> {
    let deleted = state.holding_service.delete_holding(&id).await?;
    Ok(Json(Holding::from(deleted)))
}

#[utoipa::path(
    get,
    path = "/api/v1/crypto/std",
    responses(
        (
            status = 200,
            description = "Recorded snapshots, or the first calculation",
            body = [StandardDeviation]
        ),
        (status = 404, description = "No holdings")
    )
)]
pub async fn get_standard_deviations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StandardDeviationHistory>> {
    let _guard = state.recompute_lock.lock().await;
    let history = state
        .volatility_service
        .get_standard_deviation_history()
        .await?;
    Ok(Json(history.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/crypto/std/new",
    responses(
        (status = 200, body = StandardDeviationUpdate),
        (status = 404, description = "No holdings"),
        (status = 503, description = "Price provider unavailable")
    )
)]
pub async fn calculate_standard_deviation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StandardDeviationUpdate>> {
    let _guard = state.recompute_lock.lock().await;
    let update = state
        .volatility_service
        .calculate_new_standard_deviation()
        .await?;
    Ok(Json(update.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/crypto", get(get_portfolio).post(create_holding))
        .route("/crypto/std", get(get_standard_deviations))
        .route("/crypto/std/new", get(calculate_standard_deviation))
        .route(
            "/crypto/{id}",
            get(get_holding).put(update_holding).delete(delete_holding),
        )
}
