use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SupportTicket;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketList {
    pub items: Vec<SupportTicket>,
}
