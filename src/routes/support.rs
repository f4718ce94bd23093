use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::support::CreateTicketRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::SupportTicket,
    response::ApiResponse,
    services::support_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_ticket))
}

/// Open to anonymous visitors; a bearer token, when present, links the
/// ticket to the account.
#[utoipa::path(
    post,
    path = "/api/support",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = ApiResponse<SupportTicket>),
        (status = 400, description = "Missing fields")
    ),
    tag = "Support"
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Json(payload): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SupportTicket>>)> {
    let resp = support_service::create_ticket(&state, user.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
