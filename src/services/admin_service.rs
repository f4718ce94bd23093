use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, LockType};

use crate::{
    audit,
    dto::{
        admin::{
            Commission, DashboardStats, OrdersPoint, PeriodFigure, PeriodStats, RecentUser,
            SalesPoint, StatsPeriod, StatsQuery, TopProduct, UpdateUserRequest, UserList,
            UserListQuery, VerificationAction, VerificationDecisionRequest,
        },
        orders::{OrderList, OrderWithItems, UpdateOrderStatusRequest},
        products::{ProductList, UpdateProductRequest},
    },
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        products::{Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, Product, Role, User, VerificationStatus},
    policy::ensure_admin,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination, ProductQuery},
    services::{
        convert::{order_from_entity, product_from_entity, user_from_entity},
        order_service::{self, OrderRef},
        product_service, settings_service,
    },
    state::AppState,
};

const RECENT_LIMIT: u64 = 5;
const TOP_PRODUCTS_LIMIT: i64 = 10;

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserListQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(role) = query.role {
        condition = condition.add(UserCol::Role.eq(role.as_str()));
    }

    let finder = Users::find()
        .filter(condition)
        .order_by_desc(UserCol::CreatedAt)
        .order_by_desc(UserCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_user(state: &AppState, user: &AuthUser, id: i64) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let model = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("User found", user_from_entity(model)?, Some(Meta::empty())))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = payload.email {
        if !email.contains('@') {
            return Err(AppError::BadRequest("Email is invalid".into()));
        }
        active.email = Set(email.trim().to_lowercase());
    }
    if let Some(role) = payload.role {
        active.role = Set(role.as_str().to_string());
    }
    if let Some(company_name) = payload.company_name {
        active.company_name = Set(Some(company_name));
    }
    if let Some(is_admin) = payload.is_admin {
        active.is_admin = Set(is_admin);
    }
    if let Some(status) = payload.verification_status {
        active.verification_status = Set(Some(status.as_str().to_string()));
    }
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success("User updated", user_from_entity(model)?, Some(Meta::empty())))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::BadRequest("You cannot delete your own account".into()));
    }

    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = id, admin_id = user.user_id, "user deleted");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_all_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let (items, meta) = product_service::search_products(&state.orm, Condition::all(), &query).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product_admin(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product found", product, Some(Meta::empty())))
}

pub async fn update_product_admin(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let product = Products::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let active = product_service::apply_update(product.into(), payload)?;
    let updated = active.update(&txn).await?;

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": updated.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product updated",
        product_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product_admin(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (orders, meta) = order_service::find_orders(&state.orm, Condition::all(), &query).await?;
    Ok(ApiResponse::success("Orders", OrderList { items: orders }, Some(meta)))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = order_service::find_order(&state.orm, &OrderRef::Id(id))
        .await?
        .ok_or(AppError::NotFound)?;
    let items = order_service::load_order_items(&state.orm, order.id, None).await?;

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: order_from_entity(order)?,
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    order_service::update_order_status(state, user, id, payload).await
}

pub async fn get_commission(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Commission>> {
    ensure_admin(user)?;
    let commission = settings_service::commission_rate(&state.orm).await?;
    Ok(ApiResponse::success("Commission", Commission { commission }, None))
}

pub async fn set_commission(
    state: &AppState,
    user: &AuthUser,
    payload: Commission,
) -> AppResult<ApiResponse<Commission>> {
    ensure_admin(user)?;
    let commission = settings_service::store_commission(&state.orm, payload.commission).await?;

    tracing::info!(commission = %commission, admin_id = user.user_id, "commission updated");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "commission_update",
        "settings",
        serde_json::json!({ "commission": commission.to_string() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Commission updated",
        Commission { commission },
        Some(Meta::empty()),
    ))
}

pub async fn list_verifications(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Users::find()
        .filter(UserCol::VerificationStatus.eq(VerificationStatus::Pending.as_str()))
        .order_by_asc(UserCol::VerificationRequestedAt)
        .order_by_asc(UserCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Pending verifications",
        UserList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn decide_verification(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: VerificationDecisionRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;

    let reason = payload
        .rejection_reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    if payload.action == VerificationAction::Reject && reason.is_none() {
        return Err(AppError::BadRequest("rejection_reason is required".into()));
    }

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let now = Utc::now();
    let mut active: UserActive = existing.into();
    match payload.action {
        VerificationAction::Approve => {
            active.role = Set(Role::Seller.as_str().to_string());
            active.verification_status = Set(Some(VerificationStatus::Approved.as_str().to_string()));
            active.verification_approved_at = Set(Some(now.into()));
            active.verification_rejection_reason = Set(None);
        }
        VerificationAction::Reject => {
            active.verification_status = Set(Some(VerificationStatus::Rejected.as_str().to_string()));
            active.verification_rejected_at = Set(Some(now.into()));
            active.verification_rejection_reason = Set(reason);
        }
    }
    active.updated_at = Set(now.into());
    let model = active.update(&state.orm).await?;

    tracing::info!(user_id = model.id, action = ?payload.action, "verification decided");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "verification_decision",
        "users",
        serde_json::json!({ "user_id": model.id, "status": model.verification_status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Verification updated",
        user_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// Returns `(previous_start, start)`: the current window is `[start, now]`
/// and the previous one is `[previous_start, start)`.
pub fn period_bounds(period: StatsPeriod, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let back = |from: DateTime<Utc>| match period {
        StatsPeriod::Week => from - Duration::days(7),
        StatsPeriod::Month => from.checked_sub_months(Months::new(1)).unwrap_or(from),
        StatsPeriod::Year => from.checked_sub_months(Months::new(12)).unwrap_or(from),
    };
    let start = back(now);
    (back(start), start)
}

/// Whole-percent change from `previous` to `current`. Growth from nothing
/// counts as 100.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED).round()
}

pub fn average_order_value(revenue: Decimal, orders: i64) -> Decimal {
    if orders == 0 {
        return Decimal::ZERO;
    }
    (revenue / Decimal::from(orders)).round_dp(2)
}

fn figure(current: Decimal, previous: Decimal) -> PeriodFigure {
    PeriodFigure {
        current,
        previous,
        change_percent: percent_change(current, previous),
    }
}

#[derive(sqlx::FromRow)]
struct WindowTotals {
    revenue: Decimal,
    orders: i64,
    new_users: i64,
}

#[derive(sqlx::FromRow)]
struct Bucket {
    bucket: DateTime<Utc>,
    amount: Decimal,
    orders: i64,
}

async fn window_totals(
    state: &AppState,
    from: DateTime<Utc>,
    until: Option<DateTime<Utc>>,
) -> AppResult<WindowTotals> {
    let totals = sqlx::query_as::<_, WindowTotals>(
        r#"
        SELECT
            (SELECT COALESCE(SUM(total_amount), 0) FROM orders
              WHERE created_at >= $1 AND ($2::timestamptz IS NULL OR created_at < $2)) AS revenue,
            (SELECT COUNT(*) FROM orders
              WHERE created_at >= $1 AND ($2::timestamptz IS NULL OR created_at < $2)) AS orders,
            (SELECT COUNT(*) FROM users
              WHERE created_at >= $1 AND ($2::timestamptz IS NULL OR created_at < $2)) AS new_users
        "#,
    )
    .bind(from)
    .bind(until)
    .fetch_one(&state.pool)
    .await?;
    Ok(totals)
}

async fn period_stats(state: &AppState, period: StatsPeriod) -> AppResult<PeriodStats> {
    let (previous_start, start) = period_bounds(period, Utc::now());
    let current = window_totals(state, start, None).await?;
    let previous = window_totals(state, previous_start, Some(start)).await?;

    let (unit, format) = match period {
        StatsPeriod::Year => ("month", "%Y-%m"),
        StatsPeriod::Week | StatsPeriod::Month => ("day", "%Y-%m-%d"),
    };
    let buckets = sqlx::query_as::<_, Bucket>(
        r#"
        SELECT date_trunc($1, created_at, 'UTC') AS bucket,
               COALESCE(SUM(total_amount), 0) AS amount,
               COUNT(*) AS orders
        FROM orders
        WHERE created_at >= $2
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(unit)
    .bind(start)
    .fetch_all(&state.pool)
    .await?;

    let sales_by_date = buckets
        .iter()
        .map(|b| SalesPoint {
            date: b.bucket.format(format).to_string(),
            amount: b.amount,
        })
        .collect();
    let orders_by_date = buckets
        .iter()
        .map(|b| OrdersPoint {
            date: b.bucket.format(format).to_string(),
            count: b.orders,
        })
        .collect();

    let top_products = sqlx::query_as::<_, TopProduct>(
        r#"
        SELECT p.id, p.name, p.image_url,
               SUM(oi.quantity)::BIGINT AS quantity,
               SUM(oi.price * oi.quantity) AS revenue
        FROM order_items oi
        JOIN products p ON p.id = oi.product_id
        JOIN orders o ON o.id = oi.order_id
        WHERE o.created_at >= $1
        GROUP BY p.id, p.name, p.image_url
        ORDER BY revenue DESC, p.id
        LIMIT $2
        "#,
    )
    .bind(start)
    .bind(TOP_PRODUCTS_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    Ok(PeriodStats {
        period,
        from: start,
        revenue: figure(current.revenue, previous.revenue),
        orders: figure(Decimal::from(current.orders), Decimal::from(previous.orders)),
        average_order_value: figure(
            average_order_value(current.revenue, current.orders),
            average_order_value(previous.revenue, previous.orders),
        ),
        new_users: figure(
            Decimal::from(current.new_users),
            Decimal::from(previous.new_users),
        ),
        sales_by_date,
        orders_by_date,
        top_products,
    })
}

pub async fn stats(
    state: &AppState,
    user: &AuthUser,
    query: StatsQuery,
) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;

    let user_count = Users::find().count(&state.orm).await?;
    let order_count = Orders::find().count(&state.orm).await?;
    let product_count = Products::find().count(&state.orm).await?;

    let revenue: Option<Option<Decimal>> = Orders::find()
        .select_only()
        .column_as(Expr::col(OrderCol::TotalAmount).sum(), "revenue")
        .into_tuple()
        .one(&state.orm)
        .await?;
    let total_revenue = revenue.flatten().unwrap_or(Decimal::ZERO);

    let recent_orders = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let recent_users = Users::find()
        .order_by_desc(UserCol::CreatedAt)
        .limit(RECENT_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| {
            user_from_entity(model).map(|u| RecentUser {
                id: u.id,
                name: u.name,
                email: u.email,
                role: u.role,
                created_at: u.created_at,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Stats",
        DashboardStats {
            user_count,
            order_count,
            product_count,
            total_revenue,
            recent_orders,
            recent_users,
            period: period_stats(state, query.period.unwrap_or_default()).await?,
        },
        None,
    ))
}
