//! Capability checks. Every role comparison in the crate goes through
//! [`authorize`].

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{OrderStatus, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Back-office access: users, all products, all orders, settings.
    Administer,
    /// Seller dashboard: own products and seller-scoped orders.
    AccessSellerArea,
    ViewOrder,
    SetOrderStatus(OrderStatus),
    ManageProduct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Platform,
    Order { owner_id: Option<i64> },
    Product { seller_id: Option<i64> },
}

pub fn can(actor: &AuthUser, action: Action, resource: Resource) -> bool {
    if actor.has_admin_rights() {
        return true;
    }

    match (action, resource) {
        (Action::Administer, _) => false,
        (Action::AccessSellerArea, _) => actor.role == Role::Seller,
        (Action::ViewOrder, Resource::Order { owner_id }) => owner_id == Some(actor.user_id),
        // Only the buyer acknowledges receipt, whatever their role.
        (Action::SetOrderStatus(OrderStatus::Completed), Resource::Order { owner_id }) => {
            owner_id == Some(actor.user_id)
        }
        (Action::SetOrderStatus(_), _) => false,
        (Action::ManageProduct, Resource::Product { seller_id }) => {
            actor.role == Role::Seller && seller_id == Some(actor.user_id)
        }
        (Action::ViewOrder | Action::ManageProduct, _) => false,
    }
}

pub fn authorize(actor: &AuthUser, action: Action, resource: Resource) -> AppResult<()> {
    if can(actor, action, resource) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = actor.user_id,
            role = %actor.role,
            ?action,
            ?resource,
            "capability denied"
        );
        Err(AppError::Forbidden)
    }
}

pub fn ensure_admin(actor: &AuthUser) -> AppResult<()> {
    authorize(actor, Action::Administer, Resource::Platform)
}

pub fn ensure_seller(actor: &AuthUser) -> AppResult<()> {
    authorize(actor, Action::AccessSellerArea, Resource::Platform)
}
