pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub(crate) mod convert;
pub mod favorite_service;
pub mod fulfillment_service;
pub mod order_service;
pub mod product_service;
pub mod profile_service;
pub mod settings_service;
pub mod support_service;
