use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;

use crate::{
    audit,
    dto::profile::{UpdateProfileRequest, VerificationRequest},
    entity::users::{ActiveModel as UserActive, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{SellerType, User, VerificationStatus},
    response::{ApiResponse, Meta},
    services::convert::user_from_entity,
    state::AppState,
};

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", user_from_entity(model)?, None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(user.user_id)
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
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(logo) = payload.logo {
        active.logo = Set(Some(logo));
    }
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Profile updated",
        user_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

fn filled(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn require(value: &Option<String>, field: &str) -> AppResult<String> {
    filled(value).ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Checks that the application carries the identity fields of its seller type.
pub fn validate_verification_request(payload: &VerificationRequest) -> AppResult<()> {
    match payload.seller_type {
        SellerType::Individual => {
            require(&payload.passport_number, "passport_number")?;
            require(&payload.passport_issued_by, "passport_issued_by")?;
            let issued = payload
                .passport_issue_date
                .ok_or_else(|| AppError::BadRequest("passport_issue_date is required".into()))?;
            if issued > Utc::now().date_naive() {
                return Err(AppError::BadRequest(
                    "passport_issue_date must not be in the future".into(),
                ));
            }
        }
        SellerType::Company => {
            require(&payload.company_name, "company_name")?;
            require(&payload.inn, "inn")?;
        }
    }

    if payload
        .verification_documents
        .iter()
        .any(|url| url.trim().is_empty())
    {
        return Err(AppError::BadRequest(
            "verification_documents must not contain empty entries".into(),
        ));
    }
    Ok(())
}

pub async fn request_verification(
    state: &AppState,
    user: &AuthUser,
    payload: VerificationRequest,
) -> AppResult<ApiResponse<User>> {
    validate_verification_request(&payload)?;

    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if existing.verification_status.as_deref() == Some(VerificationStatus::Approved.as_str()) {
        return Err(AppError::BadRequest("Seller verification already approved".into()));
    }

    let now = Utc::now();
    let mut active: UserActive = existing.into();
    active.seller_type = Set(Some(payload.seller_type.as_str().to_string()));
    active.company_name = Set(filled(&payload.company_name));
    active.inn = Set(filled(&payload.inn));
    active.passport_number = Set(filled(&payload.passport_number));
    active.passport_issued_by = Set(filled(&payload.passport_issued_by));
    active.passport_issue_date = Set(payload.passport_issue_date);
    let documents: Vec<String> = payload
        .verification_documents
        .iter()
        .map(|url| url.trim().to_string())
        .collect();
    active.verification_documents = Set(json!(documents));
    active.verification_status = Set(Some(VerificationStatus::Pending.as_str().to_string()));
    active.verification_requested_at = Set(Some(now.into()));
    active.verification_rejected_at = Set(None);
    active.verification_rejection_reason = Set(None);
    active.updated_at = Set(now.into());
    let model = active.update(&state.orm).await?;

    tracing::info!(
        user_id = model.id,
        seller_type = payload.seller_type.as_str(),
        "seller verification requested"
    );
    audit::record(
        &state.pool,
        Some(model.id),
        "verification_request",
        "users",
        json!({ "user_id": model.id, "seller_type": payload.seller_type.as_str() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Verification requested",
        user_from_entity(model)?,
        Some(Meta::empty()),
    ))
}
