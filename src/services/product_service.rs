use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::LockType;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    routes::params::{Pagination, ProductQuery, ProductSortBy, SortOrder},
    services::convert::product_from_entity,
    state::AppState,
};

pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::BadRequest("price must not be negative".into()));
    }
    Ok(())
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    Ok(())
}

/// Catalog search. `condition` scopes the listing (published only for the
/// storefront, everything for the back-office).
pub(crate) async fn search_products<C: ConnectionTrait>(
    db: &C,
    mut condition: Condition,
    query: &ProductQuery,
) -> AppResult<(Vec<Product>, Meta)> {
    let (page, limit, offset) = query.pagination().normalize();

    if let Some(search) = query.q.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col).order_by_asc(Column::Id),
        SortOrder::Desc => finder.order_by_desc(sort_col).order_by_desc(Column::Id),
    };

    let total = finder.clone().count(db).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(db)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok((items, Meta::new(page, limit, total)))
}

/// Applies the optional fields of an update to a product row.
pub(crate) fn apply_update(
    mut active: ActiveModel,
    payload: UpdateProductRequest,
) -> AppResult<ActiveModel> {
    if let Some(name) = payload.name {
        validate_name(&name)?;
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(is_published) = payload.is_published {
        active.is_published = Set(is_published);
    }
    active.updated_at = Set(Utc::now().into());
    Ok(active)
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let condition = Condition::all().add(Column::IsPublished.eq(true));
    let (items, meta) = search_products(&state.orm, condition, &query).await?;
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .filter(Column::IsPublished.eq(true))
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

/// Loads a product the caller may manage. Products of other sellers are
/// reported as missing rather than forbidden.
async fn find_managed_product<C: ConnectionTrait>(
    db: &C,
    user: &AuthUser,
    id: i64,
    lock: bool,
) -> AppResult<ProductModel> {
    let mut finder = Products::find_by_id(id);
    if lock {
        finder = finder.lock(LockType::Update);
    }
    let product = finder.one(db).await?.ok_or(AppError::NotFound)?;

    let resource = Resource::Product {
        seller_id: product.seller_id,
    };
    if !policy::can(user, Action::ManageProduct, resource) {
        return Err(AppError::NotFound);
    }
    Ok(product)
}

pub async fn list_seller_products(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    policy::ensure_seller(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Products::find()
        .filter(Column::SellerId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_seller_product(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Product>> {
    policy::ensure_seller(user)?;
    let product = find_managed_product(&state.orm, user, id, false).await?;
    Ok(ApiResponse::success("Product", product_from_entity(product), None))
}

pub async fn create_seller_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    policy::ensure_seller(user)?;
    validate_name(&payload.name)?;
    validate_price(payload.price)?;

    let now = Utc::now();
    let product = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        image_url: Set(payload.image_url),
        is_published: Set(true),
        seller_id: Set(Some(user.user_id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = product.id, seller_id = user.user_id, "product created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_seller_product(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    policy::ensure_seller(user)?;
    let existing = find_managed_product(&state.orm, user, id, false).await?;

    let active = apply_update(existing.into(), payload)?;
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_seller_product(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    policy::ensure_seller(user)?;
    let existing = find_managed_product(&state.orm, user, id, false).await?;

    Products::delete_by_id(existing.id).exec(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_publish(
    state: &AppState,
    user: &AuthUser,
    id: i64,
) -> AppResult<ApiResponse<Product>> {
    policy::ensure_seller(user)?;

    let txn = state.orm.begin().await?;
    let existing = find_managed_product(&txn, user, id, true).await?;
    let published = !existing.is_published;

    let mut active: ActiveModel = existing.into();
    active.is_published = Set(published);
    active.updated_at = Set(Utc::now().into());
    let product = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(product_id = product.id, published, "product publish toggled");

    Ok(ApiResponse::success(
        if published { "Published" } else { "Unpublished" },
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}
