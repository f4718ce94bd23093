use std::env;

use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub default_commission: Decimal,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let default_commission = env::var("DEFAULT_COMMISSION")
            .ok()
            .and_then(|v| v.parse::<Decimal>().ok())
            .unwrap_or(crate::services::settings_service::DEFAULT_COMMISSION);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            default_commission,
        })
    }
}
