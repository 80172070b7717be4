use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::{
    CatalogResponse, DashboardResponse, MaintenanceStatusResponse, MarkServicedRequest,
    UpdateOdometersRequest, UpdateOdometersResponse,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::service_record::ServiceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/odometers", put(update_odometers))
        .route("/service", post(mark_serviced))
        .route("/:vehicle/status", get(vehicle_status))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

pub fn create_catalog_router() -> Router<AppState> {
    Router::new().route("/", get(list_catalog))
}

async fn list_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let controller = MaintenanceController::new(&state);
    Json(controller.catalog())
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.dashboard(user.user_id).await?;
    Ok(Json(response))
}

async fn update_odometers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateOdometersRequest>,
) -> Result<Json<ApiResponse<UpdateOdometersResponse>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.update_odometers(user.user_id, request).await?;
    Ok(Json(response))
}

async fn mark_serviced(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<MarkServicedRequest>,
) -> Result<Json<ApiResponse<ServiceRecord>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.mark_serviced(user.user_id, request).await?;
    Ok(Json(response))
}

async fn vehicle_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle): Path<String>,
) -> Result<Json<MaintenanceStatusResponse>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.status(user.user_id, &vehicle).await?;
    Ok(Json(response))
}
