use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::SellerType;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}

/// Seller application. Individuals identify by passport, companies by
/// registered name and INN.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerificationRequest {
    pub seller_type: SellerType,
    pub company_name: Option<String>,
    pub inn: Option<String>,
    pub passport_number: Option<String>,
    pub passport_issued_by: Option<String>,
    pub passport_issue_date: Option<NaiveDate>,
    /// URLs of uploaded scans.
    #[serde(default)]
    pub verification_documents: Vec<String>,
}
