use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{
        CreateOrderRequest, OrderItemView, OrderList, OrderWithItems, ShippingAddress,
        UpdateOrderStatusRequest,
    },
    entity::{
        cart_items::{Column as CartCol, Entity as CartItems},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus},
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    services::{
        convert::{order_from_entity, order_item_from_entity, parse_order_status, product_from_entity},
        settings_service,
    },
    state::AppState,
};

/// How a caller names an order: a purely numeric reference is the internal
/// id, anything else is an order number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRef {
    Id(i64),
    Number(String),
}

impl FromStr for OrderRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::BadRequest("Order number is required".into()));
        }
        Ok(match s.parse::<i64>() {
            Ok(id) => OrderRef::Id(id),
            Err(_) => OrderRef::Number(s.to_string()),
        })
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_shipping_address(address: &ShippingAddress) -> AppResult<()> {
    let missing: Vec<&str> = [
        ("full_name", &address.full_name),
        ("email", &address.email),
        ("phone", &address.phone),
        ("address", &address.address),
    ]
    .into_iter()
    .filter(|(_, value)| blank(value))
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "shipping_address is missing: {}",
            missing.join(", ")
        )));
    }
    if !address.email.contains('@') {
        return Err(AppError::BadRequest("shipping_address.email is invalid".into()));
    }
    Ok(())
}

pub fn validate_order_request(payload: &CreateOrderRequest) -> AppResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest(
            "Invalid order data: items array is required".into(),
        ));
    }
    if let Some(line) = payload.items.iter().find(|line| line.quantity < 1) {
        return Err(AppError::BadRequest(format!(
            "quantity for product {} must be greater than 0",
            line.product_id
        )));
    }
    validate_shipping_address(&payload.shipping_address)
}

/// Sum of `unit_price × quantity` over the lines.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| price * Decimal::from(quantity))
        .sum()
}

pub fn commission_amount(total: Decimal, rate: Decimal) -> Decimal {
    (total * rate / Decimal::ONE_HUNDRED).round_dp(2)
}

pub fn build_order_number(now: DateTime<Utc>, seed: Uuid) -> String {
    let date = now.format("%Y%m%d");
    let suffix = seed.simple().to_string().to_uppercase();
    format!("ORD-{}-{}", date, &suffix[..8])
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    validate_order_request(&payload)?;

    let product_ids: Vec<i64> = payload.items.iter().map(|line| line.product_id).collect();

    let txn = state.orm.begin().await?;

    // Prices are read once, here, and copied onto the order items.
    let products: HashMap<i64, _> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut lines = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let product = products
            .get(&line.product_id)
            .filter(|product| product.is_published)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Product {} is not available", line.product_id))
            })?;
        lines.push((product, line.quantity));
    }

    let total_amount = order_total(lines.iter().map(|(product, qty)| (product.price, *qty)));
    let commission_rate = settings_service::commission_rate(&txn).await?;
    let now = Utc::now();
    let shipping = payload.shipping_address;

    let order = OrderActive {
        id: NotSet,
        order_number: Set(build_order_number(now, Uuid::new_v4())),
        user_id: Set(Some(user.user_id)),
        full_name: Set(shipping.full_name.trim().to_string()),
        email: Set(shipping.email.trim().to_string()),
        phone: Set(shipping.phone.trim().to_string()),
        address: Set(shipping.address.trim().to_string()),
        total_amount: Set(total_amount),
        commission_rate: Set(commission_rate),
        commission_amount: Set(commission_amount(total_amount, commission_rate)),
        payment_id: Set(payload.payment_id),
        paid: Set(payload.paid),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (product, quantity) in lines {
        let item = OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(product.id),
            quantity: Set(quantity),
            price: Set(product.price),
            is_send: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        items.push(OrderItemView {
            item: order_item_from_entity(item),
            product: Some(product_from_entity(product.clone())),
        });
    }

    CartItems::delete_many()
        .filter(
            Condition::all()
                .add(CartCol::UserId.eq(user.user_id))
                .add(CartCol::ProductId.is_in(product_ids)),
        )
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        user_id = user.user_id,
        total = %order.total_amount,
        items = items.len(),
        "order created"
    );
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "order_number": order.order_number }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: order_from_entity(order)?,
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    let (orders, meta) = find_orders(&state.orm, condition, &query).await?;
    Ok(ApiResponse::success("Ok", OrderList { items: orders }, Some(meta)))
}

/// Paginated order listing shared by the buyer and admin views.
pub(crate) async fn find_orders<C: ConnectionTrait>(
    db: &C,
    mut condition: Condition,
    query: &OrderListQuery,
) -> AppResult<(Vec<Order>, Meta)> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(db).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(db)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok((orders, Meta::new(page, limit, total)))
}

pub(crate) async fn find_order<C: ConnectionTrait>(
    db: &C,
    reference: &OrderRef,
) -> AppResult<Option<OrderModel>> {
    let order = match reference {
        OrderRef::Id(id) => Orders::find_by_id(*id).one(db).await?,
        OrderRef::Number(number) => {
            Orders::find()
                .filter(OrderCol::OrderNumber.eq(number.as_str()))
                .one(db)
                .await?
        }
    };
    Ok(order)
}

/// Loads the order's items with the products they reference. When
/// `seller_id` is given only that seller's items are kept.
pub(crate) async fn load_order_items<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    seller_id: Option<i64>,
) -> AppResult<Vec<OrderItemView>> {
    let mut finder = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .find_also_related(Products);
    if let Some(seller_id) = seller_id {
        finder = finder.filter(ProdCol::SellerId.eq(seller_id));
    }

    let items = finder
        .order_by_asc(OrderItemCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(item, product)| OrderItemView {
            item: order_item_from_entity(item),
            product: product.map(product_from_entity),
        })
        .collect();
    Ok(items)
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    reference: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let reference: OrderRef = reference.parse()?;
    let order = find_order(&state.orm, &reference)
        .await?
        .ok_or(AppError::NotFound)?;

    policy::authorize(
        user,
        Action::ViewOrder,
        Resource::Order {
            owner_id: order.user_id,
        },
    )?;

    let items = load_order_items(&state.orm, order.id, None).await?;

    Ok(ApiResponse::success(
        "OK",
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
    let next = payload.status;
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    policy::authorize(
        user,
        Action::SetOrderStatus(next),
        Resource::Order {
            owner_id: order.user_id,
        },
    )?;

    let current = parse_order_status(&order.status)?;
    if !current.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "Cannot move order from {current} to {next}"
        )));
    }

    let mut active: OrderActive = order.into();
    active.status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(order_id = order.id, from = %current, to = %next, "order status updated");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}
