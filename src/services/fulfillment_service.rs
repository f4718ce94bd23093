use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::{Expr, LockType};

use crate::{
    audit,
    dto::orders::{OrderItemView, OrderWithItems, SellerOrderList, ShipmentResult},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::OrderStatus,
    policy,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::convert::{order_from_entity, order_item_from_entity, parse_order_status, product_from_entity},
    state::AppState,
};

/// An order rolls up to `shipped` once every item is shipped, and only from
/// `processing`.
pub fn should_roll_up<I>(status: OrderStatus, shipped_flags: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    if status != OrderStatus::Processing {
        return false;
    }
    let mut any = false;
    for shipped in shipped_flags {
        if !shipped {
            return false;
        }
        any = true;
    }
    any
}

/// Orders that contain at least one of the seller's products, each with only
/// that seller's items.
pub async fn list_seller_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<SellerOrderList>> {
    policy::ensure_seller(user)?;
    let (page, limit, offset) = pagination.normalize();

    let order_ids: Vec<i64> = OrderItems::find()
        .select_only()
        .column(OrderItemCol::OrderId)
        .distinct()
        .inner_join(Products)
        .filter(ProdCol::SellerId.eq(user.user_id))
        .into_tuple()
        .all(&state.orm)
        .await?;

    let finder = Orders::find()
        .filter(OrderCol::Id.is_in(order_ids))
        .order_by_desc(OrderCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let page_ids: Vec<i64> = orders.iter().map(|order| order.id).collect();
    let mut items_by_order: BTreeMap<i64, Vec<_>> = BTreeMap::new();
    for (item, product) in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(page_ids))
        .find_also_related(Products)
        .filter(ProdCol::SellerId.eq(user.user_id))
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?
    {
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItemView {
                item: order_item_from_entity(item),
                product: product.map(product_from_entity),
            });
    }

    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let order_items = items_by_order.remove(&order.id).unwrap_or_default();
        items.push(OrderWithItems {
            order: order_from_entity(order)?,
            items: order_items,
        });
    }

    Ok(ApiResponse::success(
        "Seller orders",
        SellerOrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Sets `is_send` on the caller's items of one order and rolls the order up
/// to `shipped` when every item is shipped.
///
/// The order row stays locked for the whole transaction, so concurrent
/// sellers on the same order are serialized and the last one to ship sees
/// the complete set of flags.
pub async fn mark_seller_items_shipped(
    state: &AppState,
    user: &AuthUser,
    order_id: i64,
    shipped: bool,
) -> AppResult<ApiResponse<ShipmentResult>> {
    policy::ensure_seller(user)?;

    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let seller_item_ids: Vec<i64> = OrderItems::find()
        .select_only()
        .column(OrderItemCol::Id)
        .inner_join(Products)
        .filter(OrderItemCol::OrderId.eq(order_id))
        .filter(ProdCol::SellerId.eq(user.user_id))
        .into_tuple()
        .all(&txn)
        .await?;

    if seller_item_ids.is_empty() {
        return Err(AppError::NoSellerItems);
    }

    OrderItems::update_many()
        .col_expr(OrderItemCol::IsSend, Expr::value(shipped).into())
        .col_expr(OrderItemCol::UpdatedAt, Expr::current_timestamp().into())
        .filter(OrderItemCol::Id.is_in(seller_item_ids.clone()))
        .exec(&txn)
        .await?;

    let all_items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Id)
        .all(&txn)
        .await?;

    let status = parse_order_status(&order.status)?;
    let rolled_up = should_roll_up(status, all_items.iter().map(|item| item.is_send));

    let order = if rolled_up {
        let mut active: OrderActive = order.into();
        active.status = Set(OrderStatus::Shipped.as_str().to_string());
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?
    } else {
        order
    };

    txn.commit().await?;

    tracing::info!(
        order_id,
        seller_id = user.user_id,
        shipped,
        items = seller_item_ids.len(),
        "seller items updated"
    );
    if rolled_up {
        tracing::info!(order_id, "order rolled up to shipped");
    }
    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_items_shipment",
        "order_items",
        serde_json::json!({ "order_id": order_id, "is_send": shipped, "rolled_up": rolled_up }),
    )
    .await;

    let updated_items = all_items
        .into_iter()
        .filter(|item| seller_item_ids.contains(&item.id))
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Order items updated successfully",
        ShipmentResult {
            order: order_from_entity(order)?,
            updated_items,
            rolled_up,
        },
        Some(Meta::empty()),
    ))
}
