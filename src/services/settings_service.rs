use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait, Set, sea_query::OnConflict};

use crate::{
    entity::settings::{ActiveModel as SettingActive, Column as SettingCol, Entity as Settings},
    error::{AppError, AppResult},
};

pub const COMMISSION_KEY: &str = "commission";
pub const DEFAULT_COMMISSION: Decimal = Decimal::TEN;

/// Startup step: writes the default commission row unless one exists.
pub async fn ensure_defaults<C: ConnectionTrait>(db: &C, default_commission: Decimal) -> AppResult<()> {
    let inserted = Settings::insert(SettingActive {
        key: Set(COMMISSION_KEY.to_string()),
        value: Set(default_commission.to_string()),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(OnConflict::column(SettingCol::Key).do_nothing().to_owned())
    .exec_without_returning(db)
    .await?;

    if inserted > 0 {
        tracing::info!(commission = %default_commission, "initialized commission setting");
    }
    Ok(())
}

/// Current commission percentage. Falls back to the default when the row is
/// missing or unreadable, without writing anything.
pub async fn commission_rate<C: ConnectionTrait>(db: &C) -> AppResult<Decimal> {
    let setting = Settings::find_by_id(COMMISSION_KEY.to_string()).one(db).await?;
    let Some(setting) = setting else {
        return Ok(DEFAULT_COMMISSION);
    };

    match setting.value.trim().parse::<Decimal>() {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(value = %setting.value, error = %err, "stored commission is not a number");
            Ok(DEFAULT_COMMISSION)
        }
    }
}

pub fn validate_commission(value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(AppError::BadRequest(
            "commission must be between 0 and 100".into(),
        ));
    }
    // Orders store the rate as NUMERIC(5, 2).
    if value.normalize().scale() > 2 {
        return Err(AppError::BadRequest(
            "commission must have at most 2 decimal places".into(),
        ));
    }
    Ok(())
}

pub async fn store_commission<C: ConnectionTrait>(db: &C, value: Decimal) -> AppResult<Decimal> {
    validate_commission(value)?;
    let value = value.normalize();

    Settings::insert(SettingActive {
        key: Set(COMMISSION_KEY.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(SettingCol::Key)
            .update_columns([SettingCol::Value, SettingCol::UpdatedAt])
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    Ok(value)
}
