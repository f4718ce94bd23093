use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::{
    dto::support::{CreateTicketRequest, TicketList},
    entity::support_tickets::{ActiveModel as TicketActive, Column as TicketCol, Entity as SupportTickets},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::SupportTicket,
    policy,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::convert::ticket_from_entity,
    state::AppState,
};

pub const OPEN_STATUS: &str = "open";

pub async fn create_ticket(
    state: &AppState,
    user: Option<&AuthUser>,
    payload: CreateTicketRequest,
) -> AppResult<ApiResponse<SupportTicket>> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err(AppError::BadRequest("name, email and message are required".into()));
    }

    let ticket = TicketActive {
        id: NotSet,
        user_id: Set(user.map(|u| u.user_id)),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        message: Set(payload.message),
        status: Set(OPEN_STATUS.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(ticket_id = ticket.id, "support ticket opened");

    Ok(ApiResponse::success(
        "Ticket created",
        ticket_from_entity(ticket),
        Some(Meta::empty()),
    ))
}

pub async fn list_tickets(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<TicketList>> {
    policy::ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = SupportTickets::find().order_by_desc(TicketCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ticket_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Tickets",
        TicketList { items },
        Some(Meta::new(page, limit, total)),
    ))
}
