use marketplace_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool},
    services::{auth_service::hash_password, settings_service},
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    settings_service::ensure_defaults(&orm, config.default_commission).await?;

    let admin_id = ensure_user_with_role(&pool, "Admin", "admin@example.com", "admin123", "admin", true).await?;
    let customer_id =
        ensure_user_with_role(&pool, "Customer", "user@example.com", "user123", "customer", false).await?;
    let seller_id =
        ensure_user_with_role(&pool, "Ferris Shop", "seller@example.com", "seller123", "seller", false).await?;
    seed_products(&pool, seller_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}, Seller ID: {seller_id}");
    Ok(())
}

async fn ensure_user_with_role(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
    is_admin: bool,
) -> anyhow::Result<i64> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password_hash, role, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, is_admin = EXCLUDED.is_admin
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(is_admin)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool, seller_id: i64) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", Decimal::new(5500, 2)),
        ("Ferris Mug", "Coffee tastes better with Ferris", Decimal::new(1200, 2)),
        ("Rust Sticker Pack", "Decorate your laptop", Decimal::new(500, 2)),
        ("E-book: Async Rust", "Learn async Rust patterns", Decimal::new(2500, 2)),
    ];

    for (name, desc, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, seller_id)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1 AND seller_id = $4)
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(seller_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
