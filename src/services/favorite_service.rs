use crate::{
    audit,
    db::DbPool,
    dto::favorites::{AddFavoriteRequest, FavoriteProductList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Favorite, Product},
    response::{Ack, ApiResponse, Meta},
    routes::params::Pagination,
};

pub async fn list_favorites(
    db: &DbPool,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<FavoriteProductList>> {
    let (page, limit, offset) = pagination.normalize();
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.id, p.name, p.description, p.price, p.image_url, p.is_published,
               p.seller_id, p.created_at, p.updated_at
        FROM favorites f
        JOIN products p ON p.id = f.product_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC, f.id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(db)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    let data = FavoriteProductList { items: products };
    Ok(ApiResponse::success("OK", data, Some(meta)))
}

/// Relies on the (user_id, product_id) unique constraint: a second add is a
/// conflict, never a second row.
pub async fn add_favorite(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddFavoriteRequest,
) -> AppResult<ApiResponse<Favorite>> {
    let product_exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM products WHERE id = $1 AND is_published")
            .bind(payload.product_id)
            .fetch_optional(pool)
            .await?;

    if product_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let favorite = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO favorites (user_id, product_id)
        VALUES ($1, $2)
        RETURNING id, product_id, user_id, created_at
        "#,
    )
    .bind(user.user_id)
    .bind(payload.product_id)
    .fetch_one(pool)
    .await
    .map_err(|err| match AppError::from(err) {
        AppError::Conflict(_) => AppError::Conflict("Already in favorites".into()),
        other => other,
    })?;

    audit::record(
        pool,
        Some(user.user_id),
        "favorite_add",
        "favorites",
        serde_json::json!({ "product_id": payload.product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Added to favorites",
        favorite,
        Some(Meta::empty()),
    ))
}

/// Removing a product that is not a favorite is a no-op.
pub async fn remove_favorite(
    pool: &DbPool,
    user: &AuthUser,
    product_id: i64,
) -> AppResult<ApiResponse<Ack>> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
        .bind(user.user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        audit::record(
            pool,
            Some(user.user_id),
            "favorite_remove",
            "favorites",
            serde_json::json!({ "product_id": product_id }),
        )
        .await;
    }

    Ok(ApiResponse::success(
        "Removed from favorites",
        Ack::ok(),
        Some(Meta::empty()),
    ))
}
