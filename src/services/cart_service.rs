use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::{
    audit,
    db::DbPool,
    dto::cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartItem, Product},
    response::{Ack, ApiResponse, Meta},
    routes::params::Pagination,
};

#[derive(FromRow)]
struct CartWithProductRow {
    cart_id: i64,
    quantity: i32,
    product_id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    image_url: Option<String>,
    is_published: bool,
    seller_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_cart(
    pool: &DbPool,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CartList>> {
    let (page, limit, offset) = pagination.normalize();
    let rows = sqlx::query_as::<_, CartWithProductRow>(
        r#"
        SELECT ci.id AS cart_id, ci.quantity,
               p.id AS product_id, p.name, p.description, p.price, p.image_url,
               p.is_published, p.seller_id, p.created_at, p.updated_at
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.user_id = $1
        ORDER BY ci.created_at DESC, ci.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(pool)
        .await?;

    let items = rows
        .into_iter()
        .map(|row| CartItemDto {
            id: row.cart_id,
            product: Product {
                id: row.product_id,
                name: row.name,
                description: row.description,
                price: row.price,
                image_url: row.image_url,
                is_published: row.is_published,
                seller_id: row.seller_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            quantity: row.quantity,
        })
        .collect();

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

/// Adds `quantity` of a product. A second add of the same product grows the
/// existing row instead of inserting another one.
pub async fn add_to_cart(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItem>> {
    validate_quantity(payload.quantity)?;

    // Unpublished products are hidden from buyers.
    let product_exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM products WHERE id = $1 AND is_published")
            .bind(payload.product_id)
            .fetch_optional(pool)
            .await?;
    if product_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let cart_item = sqlx::query_as::<_, CartItem>(
        r#"
        INSERT INTO cart_items (user_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        RETURNING id, product_id, user_id, quantity, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(payload.product_id)
    .bind(payload.quantity)
    .fetch_one(pool)
    .await?;

    audit::record(
        pool,
        Some(user.user_id),
        "cart_add",
        "cart_items",
        serde_json::json!({ "product_id": payload.product_id, "quantity": cart_item.quantity }),
    )
    .await;

    Ok(ApiResponse::success("Added to cart", cart_item, Some(Meta::empty())))
}

pub async fn update_quantity(
    pool: &DbPool,
    user: &AuthUser,
    cart_item_id: i64,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartItem>> {
    validate_quantity(payload.quantity)?;

    let owner: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM cart_items WHERE id = $1")
        .bind(cart_item_id)
        .fetch_optional(pool)
        .await?;
    match owner {
        None => return Err(AppError::NotFound),
        Some((owner_id,)) if owner_id != user.user_id => return Err(AppError::Forbidden),
        Some(_) => {}
    }

    let cart_item = sqlx::query_as::<_, CartItem>(
        r#"
        UPDATE cart_items
        SET quantity = $3
        WHERE id = $1 AND user_id = $2
        RETURNING id, product_id, user_id, quantity, created_at
        "#,
    )
    .bind(cart_item_id)
    .bind(user.user_id)
    .bind(payload.quantity)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success("Cart updated", cart_item, Some(Meta::empty())))
}

/// Deleting a row that is already gone is not an error.
pub async fn remove_from_cart(
    pool: &DbPool,
    user: &AuthUser,
    cart_item_id: i64,
) -> AppResult<ApiResponse<Ack>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
        .bind(cart_item_id)
        .bind(user.user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        audit::record(
            pool,
            Some(user.user_id),
            "cart_remove",
            "cart_items",
            serde_json::json!({ "cart_item_id": cart_item_id }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Item removed from cart",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(pool: &DbPool, user: &AuthUser) -> AppResult<ApiResponse<Ack>> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user.user_id)
        .execute(pool)
        .await?;

    tracing::debug!(user_id = user.user_id, removed = result.rows_affected(), "cart cleared");

    Ok(ApiResponse::success(
        "Cart cleared successfully",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}
