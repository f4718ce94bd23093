use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::profile::{UpdateProfileRequest, VerificationRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me).put(update_profile))
        .route("/verification", post(request_verification))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = profile_service::me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 400, description = "Invalid profile data")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = profile_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/profile/verification",
    request_body = VerificationRequest,
    responses(
        (status = 200, description = "Seller verification requested", body = ApiResponse<User>),
        (status = 400, description = "Missing fields or already approved")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn request_verification(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<VerificationRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = profile_service::request_verification(&state, &user, payload).await?;
    Ok(Json(resp))
}
