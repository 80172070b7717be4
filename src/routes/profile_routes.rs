use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use crate::controllers::profile_controller::ProfileController;
use crate::dto::api_response::ApiResponse;
use crate::dto::profile_dto::UpdateProfileRequest;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.get(user.user_id).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.update(user.user_id, request).await?;
    Ok(Json(response))
}
