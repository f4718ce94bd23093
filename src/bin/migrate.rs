use marketplace_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::settings_service,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    settings_service::ensure_defaults(&orm, config.default_commission).await?;
    println!("Migrations applied");
    Ok(())
}
