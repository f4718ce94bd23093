use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use sqlx::FromRow;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::users::ActiveModel as UserActive,
    error::{AppError, AppResult},
    models::{Role, User},
    response::{ApiResponse, Meta},
    services::convert::user_from_entity,
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(FromRow)]
struct Credentials {
    id: i64,
    password_hash: String,
    role: String,
    is_admin: bool,
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn validate_registration(payload: &RegisterRequest) -> AppResult<()> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
        || payload.password_confirmation.is_empty()
    {
        return Err(AppError::BadRequest("All fields are required".into()));
    }
    if !payload.email.contains('@') {
        return Err(AppError::BadRequest("Email is invalid".into()));
    }
    if payload.password != payload.password_confirmation {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }
    Ok(())
}

pub fn issue_token(user_id: i64, role: Role, is_admin: bool, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        is_admin,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    validate_registration(&payload)?;
    let email = payload.email.trim().to_lowercase();

    let exist: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&state.pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::Conflict("Email is already taken".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let now = Utc::now();

    let user = UserActive {
        id: NotSet,
        name: Set(payload.name.trim().to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        phone: Set(None),
        address: Set(None),
        logo: Set(None),
        role: Set(Role::Customer.as_str().to_string()),
        is_admin: Set(false),
        verification_status: Set(None),
        company_name: Set(None),
        inn: Set(None),
        verification_requested_at: Set(None),
        verification_approved_at: Set(None),
        verification_rejected_at: Set(None),
        verification_rejection_reason: Set(None),
        seller_type: Set(None),
        passport_number: Set(None),
        passport_issued_by: Set(None),
        passport_issue_date: Set(None),
        verification_documents: Set(serde_json::json!([])),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = user.id, "user registered");
    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User created", user_from_entity(user)?, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let credentials: Option<Credentials> = sqlx::query_as(
        "SELECT id, password_hash, role, is_admin FROM users WHERE email = $1",
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(&state.pool)
    .await?;

    let credentials = match credentials {
        Some(c) => c,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&credentials.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let role = credentials
        .role
        .parse::<Role>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    let token = issue_token(credentials.id, role, credentials.is_admin, &state.jwt_secret)?;

    audit::record(
        &state.pool,
        Some(credentials.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": credentials.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}
