use marketplace_api::{
    error::AppError,
    middleware::auth::AuthUser,
    models::{OrderStatus, Role},
    policy::{Action, Resource, authorize, can, ensure_admin, ensure_seller},
};

fn actor(user_id: i64, role: Role) -> AuthUser {
    AuthUser {
        user_id,
        role,
        is_admin: false,
    }
}

#[test]
fn admin_flag_grants_admin_rights_regardless_of_role() {
    let flagged = AuthUser {
        user_id: 1,
        role: Role::Customer,
        is_admin: true,
    };
    assert!(ensure_admin(&flagged).is_ok());
    assert!(ensure_admin(&actor(2, Role::Admin)).is_ok());
    assert!(matches!(
        ensure_admin(&actor(3, Role::Seller)),
        Err(AppError::Forbidden)
    ));
}

#[test]
fn only_sellers_and_admins_enter_seller_area() {
    assert!(ensure_seller(&actor(1, Role::Seller)).is_ok());
    assert!(ensure_seller(&actor(2, Role::Admin)).is_ok());
    assert!(matches!(
        ensure_seller(&actor(3, Role::Customer)),
        Err(AppError::Forbidden)
    ));
}

#[test]
fn order_is_visible_to_owner_and_admin_only() {
    let order = Resource::Order { owner_id: Some(7) };
    assert!(can(&actor(7, Role::Customer), Action::ViewOrder, order));
    assert!(can(&actor(1, Role::Admin), Action::ViewOrder, order));
    assert!(!can(&actor(8, Role::Customer), Action::ViewOrder, order));
    assert!(!can(&actor(9, Role::Seller), Action::ViewOrder, order));

    let orphan = Resource::Order { owner_id: None };
    assert!(!can(&actor(7, Role::Customer), Action::ViewOrder, orphan));
}

#[test]
fn buyer_may_only_complete_own_order() {
    let order = Resource::Order { owner_id: Some(7) };
    let buyer = actor(7, Role::Customer);

    assert!(authorize(&buyer, Action::SetOrderStatus(OrderStatus::Completed), order).is_ok());
    for status in [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ] {
        assert!(matches!(
            authorize(&buyer, Action::SetOrderStatus(status), order),
            Err(AppError::Forbidden)
        ));
    }

    let stranger = actor(8, Role::Customer);
    assert!(!can(
        &stranger,
        Action::SetOrderStatus(OrderStatus::Completed),
        order
    ));
}

#[test]
fn seller_who_bought_may_complete_but_not_ship() {
    let order = Resource::Order { owner_id: Some(7) };
    let seller_buyer = actor(7, Role::Seller);
    assert!(!can(&seller_buyer, Action::SetOrderStatus(OrderStatus::Shipped), order));
    assert!(can(&seller_buyer, Action::SetOrderStatus(OrderStatus::Completed), order));

    let other_seller = actor(9, Role::Seller);
    assert!(!can(&other_seller, Action::SetOrderStatus(OrderStatus::Completed), order));
}

#[test]
fn admin_may_set_any_status() {
    let admin = actor(1, Role::Admin);
    let order = Resource::Order { owner_id: Some(7) };
    for status in [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ] {
        assert!(can(&admin, Action::SetOrderStatus(status), order));
    }
}

#[test]
fn seller_manages_only_own_products() {
    let seller = actor(5, Role::Seller);
    assert!(can(
        &seller,
        Action::ManageProduct,
        Resource::Product { seller_id: Some(5) }
    ));
    assert!(!can(
        &seller,
        Action::ManageProduct,
        Resource::Product { seller_id: Some(6) }
    ));
    assert!(!can(
        &seller,
        Action::ManageProduct,
        Resource::Product { seller_id: None }
    ));
    assert!(!can(
        &actor(5, Role::Customer),
        Action::ManageProduct,
        Resource::Product { seller_id: Some(5) }
    ));
    assert!(can(
        &actor(1, Role::Admin),
        Action::ManageProduct,
        Resource::Product { seller_id: Some(6) }
    ));
}
