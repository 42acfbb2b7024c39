//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to the lifecycle service.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use tokio_util::sync::CancellationToken;

use crate::application::dto::{
    BudgetFactorsRequest, CancelOrderRequest, CreateDraftRequest, GuaranteeSelectionRequest,
    PlayerOrderDto, UpdateBriefRequest,
};
use crate::application::ports::EventPublisherPort;
use crate::application::services::OrderLifecycleService;
use crate::domain::player_order::{PlayerOrderRepository, PlayerOrderStatus};
use crate::domain::shared::OrderId;

use super::request::ListOrdersQuery;
use super::response::{ApiError, HealthResponse, OrderListResponse, ValidateResponse};

/// Application state shared across handlers.
pub struct AppState<R, E>
where
    R: PlayerOrderRepository,
    E: EventPublisherPort,
{
    /// Lifecycle service.
    pub service: Arc<OrderLifecycleService<R, E>>,
    /// Application version.
    pub version: String,
}

impl<R, E> Clone for AppState<R, E>
where
    R: PlayerOrderRepository,
    E: EventPublisherPort,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<R, E>(state: AppState<R, E>) -> Router
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/v1/player-orders",
            post(create_draft::<R, E>).get(list_orders::<R, E>),
        )
        .route("/api/v1/player-orders/templates", get(list_templates::<R, E>))
        .route("/api/v1/player-orders/{id}", get(get_order::<R, E>))
        .route("/api/v1/player-orders/{id}/brief", patch(update_brief::<R, E>))
        .route("/api/v1/player-orders/{id}/budget", put(update_budget::<R, E>))
        .route(
            "/api/v1/player-orders/{id}/guarantees",
            put(select_guarantees::<R, E>),
        )
        .route("/api/v1/player-orders/{id}/validate", post(validate::<R, E>))
        .route("/api/v1/player-orders/{id}/publish", post(publish::<R, E>))
        .route("/api/v1/player-orders/{id}/cancel", post(cancel::<R, E>))
        .route("/api/v1/player-orders/{id}/complete", post(complete::<R, E>))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<R, E>(State(state): State<AppState<R, E>>) -> impl IntoResponse
where
    R: PlayerOrderRepository,
    E: EventPublisherPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

async fn create_draft<R, E>(
    State(state): State<AppState<R, E>>,
    Json(request): Json<CreateDraftRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state.service.create_draft(&request).await?;
    Ok((StatusCode::CREATED, Json(PlayerOrderDto::from_order(&order))))
}

async fn list_orders<R, E>(
    State(state): State<AppState<R, E>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let orders = state.service.list_by_status(query.status).await?;
    Ok(Json(OrderListResponse {
        orders: orders.iter().map(PlayerOrderDto::from_order).collect(),
    }))
}

async fn list_templates<R, E>(
    State(state): State<AppState<R, E>>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    Ok(Json(state.service.list_templates().await?))
}

async fn get_order<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state.service.get(&OrderId::new(id)).await?;
    Ok(Json(PlayerOrderDto::from_order(&order)))
}

async fn update_brief<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBriefRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state
        .service
        .update_brief(&OrderId::new(id), &request)
        .await?;
    Ok(Json(PlayerOrderDto::from_order(&order)))
}

async fn update_budget<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
    Json(request): Json<BudgetFactorsRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let estimate = state
        .service
        .update_budget_factors(&OrderId::new(id), &request)
        .await?;
    Ok(Json(estimate))
}

async fn select_guarantees<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
    Json(request): Json<GuaranteeSelectionRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let accepted = state
        .service
        .select_guarantees(&OrderId::new(id), &request)
        .await?;
    Ok(Json(accepted))
}

/// Runs a validation pass; a client that disconnects aborts it.
async fn validate<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order_id = OrderId::new(id);
    let summary = state
        .service
        .validate(&order_id, &CancellationToken::new())
        .await?;
    let status = if summary.passed() {
        PlayerOrderStatus::Validated
    } else {
        PlayerOrderStatus::Rejected
    };
    Ok(Json(ValidateResponse {
        order_id: order_id.to_string(),
        status,
        summary,
    }))
}

async fn publish<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state.service.publish(&OrderId::new(id)).await?;
    Ok(Json(PlayerOrderDto::from_order(&order)))
}

async fn cancel<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
    Json(request): Json<CancelOrderRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state
        .service
        .cancel(&OrderId::new(id), request.reason)
        .await?;
    Ok(Json(PlayerOrderDto::from_order(&order)))
}

async fn complete<R, E>(
    State(state): State<AppState<R, E>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PlayerOrderRepository + 'static,
    E: EventPublisherPort + 'static,
{
    let order = state.service.complete(&OrderId::new(id)).await?;
    Ok(Json(PlayerOrderDto::from_order(&order)))
}
