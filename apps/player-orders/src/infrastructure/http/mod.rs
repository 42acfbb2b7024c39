//! HTTP/REST API adapter.
//!
//! Inbound adapter implementing REST endpoints that delegate to the lifecycle service.

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::ListOrdersQuery;
pub use response::{
    ApiError, ErrorResponse, HealthResponse, OrderListResponse, ValidateResponse,
};
