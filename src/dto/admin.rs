use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{
    models::{Order, Role, User, VerificationStatus},
    routes::params::Pagination,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub role: Option<Role>,
}

impl UserListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<User>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub company_name: Option<String>,
    pub is_admin: Option<bool>,
    pub verification_status: Option<VerificationStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerificationDecisionRequest {
    pub action: VerificationAction,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Commission {
    pub commission: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Reporting window, compared against the window of equal length before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatsPeriod {
    Week,
    #[default]
    Month,
    Year,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StatsQuery {
    pub period: Option<StatsPeriod>,
}

/// A figure for the current window next to the previous one. `change_percent`
/// is rounded to a whole percent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PeriodFigure {
    pub current: Decimal,
    pub previous: Decimal,
    pub change_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesPoint {
    /// `YYYY-MM-DD`, or `YYYY-MM` for the yearly view.
    pub date: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrdersPoint {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema, FromRow)]
pub struct TopProduct {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub quantity: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodStats {
    pub period: StatsPeriod,
    pub from: DateTime<Utc>,
    pub revenue: PeriodFigure,
    pub orders: PeriodFigure,
    pub average_order_value: PeriodFigure,
    pub new_users: PeriodFigure,
    pub sales_by_date: Vec<SalesPoint>,
    pub orders_by_date: Vec<OrdersPoint>,
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub user_count: u64,
    pub order_count: u64,
    pub product_count: u64,
    pub total_revenue: Decimal,
    pub recent_orders: Vec<Order>,
    pub recent_users: Vec<RecentUser>,
    pub period: PeriodStats,
}
