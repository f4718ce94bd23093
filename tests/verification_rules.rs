use chrono::{Duration, NaiveDate, Utc};
use marketplace_api::{
    dto::profile::VerificationRequest,
    error::AppError,
    models::SellerType,
    services::profile_service::validate_verification_request,
};

fn individual() -> VerificationRequest {
    VerificationRequest {
        seller_type: SellerType::Individual,
        company_name: None,
        inn: None,
        passport_number: Some("4510 123456".into()),
        passport_issued_by: Some("Department 12".into()),
        passport_issue_date: NaiveDate::from_ymd_opt(2015, 6, 1),
        verification_documents: vec!["https://cdn.example.com/passport.jpg".into()],
    }
}

fn company() -> VerificationRequest {
    VerificationRequest {
        seller_type: SellerType::Company,
        company_name: Some("Acme LLC".into()),
        inn: Some("7707083893".into()),
        passport_number: None,
        passport_issued_by: None,
        passport_issue_date: None,
        verification_documents: Vec::new(),
    }
}

fn rejected(request: &VerificationRequest) -> bool {
    matches!(
        validate_verification_request(request),
        Err(AppError::BadRequest(_))
    )
}

#[test]
fn individuals_need_passport_details() {
    assert!(validate_verification_request(&individual()).is_ok());

    let mut missing_number = individual();
    missing_number.passport_number = Some("   ".into());
    assert!(rejected(&missing_number));

    let mut missing_issuer = individual();
    missing_issuer.passport_issued_by = None;
    assert!(rejected(&missing_issuer));

    let mut missing_date = individual();
    missing_date.passport_issue_date = None;
    assert!(rejected(&missing_date));

    let mut future_date = individual();
    future_date.passport_issue_date = Some((Utc::now() + Duration::days(2)).date_naive());
    assert!(rejected(&future_date));

    // Company fields do not stand in for a passport.
    let mut company_fields = individual();
    company_fields.passport_number = None;
    company_fields.company_name = Some("Acme LLC".into());
    company_fields.inn = Some("7707083893".into());
    assert!(rejected(&company_fields));
}

#[test]
fn companies_need_name_and_inn() {
    assert!(validate_verification_request(&company()).is_ok());

    let mut missing_inn = company();
    missing_inn.inn = None;
    assert!(rejected(&missing_inn));

    let mut blank_name = company();
    blank_name.company_name = Some(String::new());
    assert!(rejected(&blank_name));
}

#[test]
fn document_urls_must_not_be_blank() {
    let mut request = company();
    request.verification_documents = vec!["https://cdn.example.com/a.pdf".into(), " ".into()];
    assert!(rejected(&request));
}

#[test]
fn seller_type_reads_snake_case() {
    let request: VerificationRequest = serde_json::from_value(serde_json::json!({
        "seller_type": "company",
        "company_name": "Acme LLC",
        "inn": "7707083893"
    }))
    .unwrap();
    assert_eq!(request.seller_type, SellerType::Company);
    assert!(request.verification_documents.is_empty());
}
