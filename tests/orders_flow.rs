use chrono::{NaiveDate, Utc};
use marketplace_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        admin::{Commission, StatsPeriod, StatsQuery, VerificationAction, VerificationDecisionRequest},
        cart::AddToCartRequest,
        favorites::AddFavoriteRequest,
        orders::{CreateOrderRequest, OrderLineRequest, ShippingAddress, UpdateOrderStatusRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        profile::VerificationRequest,
    },
    entity::{
        Orders, Settings,
        products::{ActiveModel as ProductActive, Model as ProductModel},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{OrderStatus, Role, SellerType, VerificationStatus},
    routes::params::{Pagination, ProductQuery},
    services::{
        admin_service, cart_service, favorite_service, fulfillment_service, order_service,
        product_service, profile_service, settings_service,
    },
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set, Statement};
use serial_test::serial;

async fn test_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, cart_items, favorites, support_tickets, audit_logs, settings, products, users RESTART IDENTITY CASCADE",
    ))
    .await?;
    settings_service::ensure_defaults(&orm, settings_service::DEFAULT_COMMISSION).await?;

    let pool = create_pool(&database_url).await?;
    Ok(Some(AppState {
        pool,
        orm,
        jwt_secret: "test-secret".into(),
    }))
}

async fn create_user(state: &AppState, role: Role, email: &str) -> anyhow::Result<AuthUser> {
    let now = Utc::now();
    let user = UserActive {
        id: NotSet,
        name: Set(email.split('@').next().unwrap_or(email).to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        phone: Set(None),
        address: Set(None),
        logo: Set(None),
        role: Set(role.as_str().to_string()),
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

    Ok(AuthUser {
        user_id: user.id,
        role,
        is_admin: false,
    })
}

async fn create_product(
    state: &AppState,
    seller: &AuthUser,
    name: &str,
    price: Decimal,
) -> anyhow::Result<ProductModel> {
    let now = Utc::now();
    let product = ProductActive {
        id: NotSet,
        name: Set(name.into()),
        description: Set(Some(format!("{name} for testing"))),
        price: Set(price),
        image_url: Set(None),
        is_published: Set(true),
        seller_id: Set(Some(seller.user_id)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

fn shipping() -> ShippingAddress {
    ShippingAddress {
        full_name: "Test Buyer".into(),
        email: "buyer@example.com".into(),
        phone: "+10000000".into(),
        address: "Somewhere 1".into(),
    }
}

fn order_request(lines: &[(i64, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: lines
            .iter()
            .map(|&(product_id, quantity)| OrderLineRequest {
                product_id,
                quantity,
            })
            .collect(),
        shipping_address: shipping(),
        payment_id: Some("pay_123".into()),
        paid: true,
    }
}

#[tokio::test]
#[serial]
async fn checkout_freezes_prices_and_applies_commission() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let widget = create_product(&state, &seller, "Widget", Decimal::new(1000, 2)).await?;
    let gadget = create_product(&state, &seller, "Gadget", Decimal::new(550, 2)).await?;

    cart_service::add_to_cart(
        &state.pool,
        &buyer,
        AddToCartRequest {
            product_id: widget.id,
            quantity: 2,
        },
    )
    .await?;

    let created = order_service::create_order(
        &state,
        &buyer,
        order_request(&[(widget.id, 2), (gadget.id, 3)]),
    )
    .await?
    .data
    .unwrap();

    assert_eq!(created.order.total_amount, Decimal::new(3650, 2));
    assert_eq!(created.order.commission_rate, Decimal::TEN);
    assert_eq!(created.order.commission_amount, Decimal::new(365, 2));
    assert_eq!(created.order.status, OrderStatus::Pending);
    assert!(created.order.order_number.starts_with("ORD-"));
    assert_eq!(created.items.len(), 2);
    assert!(created.items.iter().all(|view| !view.item.is_send));

    // Ordered products leave the cart.
    let cart = cart_service::list_cart(&state.pool, &buyer, Pagination::default())
        .await?
        .data
        .unwrap();
    assert!(cart.items.is_empty());

    admin_service::update_product_admin(
        &state,
        &admin,
        widget.id,
        UpdateProductRequest {
            price: Some(Decimal::new(9900, 2)),
            ..Default::default()
        },
    )
    .await?;

    let fetched = order_service::get_order(&state, &buyer, &created.order.order_number)
        .await?
        .data
        .unwrap();
    let widget_line = fetched
        .items
        .iter()
        .find(|view| view.item.product_id == widget.id)
        .expect("widget line");
    assert_eq!(widget_line.item.price, Decimal::new(1000, 2));
    assert_eq!(fetched.order.total_amount, Decimal::new(3650, 2));

    let stranger = create_user(&state, Role::Customer, "other@example.com").await?;
    let err = order_service::get_order(&state, &stranger, &created.order.id.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
#[serial]
async fn invalid_orders_persist_nothing() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let widget = create_product(&state, &seller, "Widget", Decimal::new(1000, 2)).await?;

    let err = order_service::create_order(&state, &buyer, order_request(&[]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut incomplete = order_request(&[(widget.id, 1)]);
    incomplete.shipping_address.address = String::new();
    let err = order_service::create_order(&state, &buyer, incomplete)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = order_service::create_order(&state, &buyer, order_request(&[(widget.id, 1), (9999, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    product_service::toggle_publish(&state, &seller, widget.id).await?;
    let err = order_service::create_order(&state, &buyer, order_request(&[(widget.id, 1)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    assert_eq!(Orders::find().count(&state.orm).await?, 0);
    Ok(())
}

#[tokio::test]
#[serial]
async fn cart_accumulates_and_favorites_conflict() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let widget = create_product(&state, &seller, "Widget", Decimal::new(1000, 2)).await?;

    for quantity in [2, 3] {
        cart_service::add_to_cart(
            &state.pool,
            &buyer,
            AddToCartRequest {
                product_id: widget.id,
                quantity,
            },
        )
        .await?;
    }
    let cart = cart_service::list_cart(&state.pool, &buyer, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);

    let err = cart_service::add_to_cart(
        &state.pool,
        &buyer,
        AddToCartRequest {
            product_id: 9999,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let hidden = create_product(&state, &seller, "Hidden", Decimal::new(500, 2)).await?;
    product_service::toggle_publish(&state, &seller, hidden.id).await?;
    let err = cart_service::add_to_cart(
        &state.pool,
        &buyer,
        AddToCartRequest {
            product_id: hidden.id,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let err = favorite_service::add_favorite(
        &state.pool,
        &buyer,
        AddFavoriteRequest {
            product_id: hidden.id,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let other = create_user(&state, Role::Customer, "other@example.com").await?;
    let err = cart_service::update_quantity(
        &state.pool,
        &other,
        cart.items[0].id,
        marketplace_api::dto::cart::UpdateCartItemRequest { quantity: 1 },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    cart_service::remove_from_cart(&state.pool, &buyer, cart.items[0].id).await?;
    cart_service::remove_from_cart(&state.pool, &buyer, cart.items[0].id).await?;

    favorite_service::add_favorite(
        &state.pool,
        &buyer,
        AddFavoriteRequest {
            product_id: widget.id,
        },
    )
    .await?;
    let err = favorite_service::add_favorite(
        &state.pool,
        &buyer,
        AddFavoriteRequest {
            product_id: widget.id,
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "Already in favorites"),
        other => panic!("unexpected error {other:?}"),
    }

    favorite_service::remove_favorite(&state.pool, &buyer, widget.id).await?;
    favorite_service::remove_favorite(&state.pool, &buyer, widget.id).await?;
    let favorites = favorite_service::list_favorites(&state.pool, &buyer, Pagination::default())
        .await?
        .data
        .unwrap();
    assert!(favorites.items.is_empty());

    Ok(())
}

#[tokio::test]
#[serial]
async fn two_seller_order_rolls_up_after_last_shipment() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let first = create_user(&state, Role::Seller, "first@example.com").await?;
    let second = create_user(&state, Role::Seller, "second@example.com").await?;
    let bystander = create_user(&state, Role::Seller, "bystander@example.com").await?;
    let mug = create_product(&state, &first, "Mug", Decimal::new(1200, 2)).await?;
    let shirt = create_product(&state, &second, "Shirt", Decimal::new(2500, 2)).await?;

    let order = order_service::create_order(&state, &buyer, order_request(&[(mug.id, 1), (shirt.id, 2)]))
        .await?
        .data
        .unwrap()
        .order;

    let err = fulfillment_service::mark_seller_items_shipped(&state, &bystander, order.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoSellerItems));
    let untouched = order_service::get_order(&state, &buyer, &order.id.to_string())
        .await?
        .data
        .unwrap();
    assert_eq!(untouched.items.len(), 2);
    assert!(untouched.items.iter().all(|view| !view.item.is_send));
    assert_eq!(untouched.order.status, OrderStatus::Pending);

    let err = fulfillment_service::mark_seller_items_shipped(&state, &first, 9999, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    admin_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Processing,
        },
    )
    .await?;

    let seller_view = fulfillment_service::list_seller_orders(&state, &first, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(seller_view.items.len(), 1);
    assert_eq!(seller_view.items[0].items.len(), 1);
    assert_eq!(seller_view.items[0].items[0].item.product_id, mug.id);

    let partial = fulfillment_service::mark_seller_items_shipped(&state, &first, order.id, true)
        .await?
        .data
        .unwrap();
    assert!(!partial.rolled_up);
    assert_eq!(partial.order.status, OrderStatus::Processing);
    assert_eq!(partial.updated_items.len(), 1);

    let last = fulfillment_service::mark_seller_items_shipped(&state, &second, order.id, true)
        .await?
        .data
        .unwrap();
    assert!(last.rolled_up);
    assert_eq!(last.order.status, OrderStatus::Shipped);

    let fetched = order_service::get_order(&state, &buyer, &order.id.to_string())
        .await?
        .data
        .unwrap();
    assert!(fetched.items.iter().all(|view| view.item.is_send));

    Ok(())
}

#[tokio::test]
#[serial]
async fn buyer_completes_and_transitions_move_forward() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let widget = create_product(&state, &seller, "Widget", Decimal::new(1000, 2)).await?;

    let order = order_service::create_order(&state, &buyer, order_request(&[(widget.id, 1)]))
        .await?
        .data
        .unwrap()
        .order;

    let err = order_service::update_order_status(
        &state,
        &buyer,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = order_service::update_order_status(
        &state,
        &seller,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    order_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await?;

    let err = order_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Pending,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let completed = order_service::update_order_status(
        &state,
        &buyer,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Completed,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);

    Ok(())
}

#[tokio::test]
#[serial]
async fn commission_change_applies_to_new_orders_only() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let widget = create_product(&state, &seller, "Widget", Decimal::new(10000, 2)).await?;

    let current = admin_service::get_commission(&state, &admin).await?.data.unwrap();
    assert_eq!(current.commission, Decimal::TEN);

    let before = order_service::create_order(&state, &buyer, order_request(&[(widget.id, 1)]))
        .await?
        .data
        .unwrap()
        .order;

    let err = admin_service::set_commission(
        &state,
        &admin,
        Commission {
            commission: Decimal::new(101, 0),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = admin_service::set_commission(
        &state,
        &buyer,
        Commission {
            commission: Decimal::new(15, 0),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    admin_service::set_commission(
        &state,
        &admin,
        Commission {
            commission: Decimal::new(15, 0),
        },
    )
    .await?;

    let after = order_service::create_order(&state, &buyer, order_request(&[(widget.id, 1)]))
        .await?
        .data
        .unwrap()
        .order;
    assert_eq!(after.commission_rate, Decimal::new(15, 0));
    assert_eq!(after.commission_amount, Decimal::new(1500, 2));

    let reread = order_service::get_order(&state, &buyer, &before.order_number)
        .await?
        .data
        .unwrap();
    assert_eq!(reread.order.commission_rate, Decimal::TEN);
    assert_eq!(reread.order.commission_amount, Decimal::new(1000, 2));

    Ok(())
}

#[tokio::test]
#[serial]
async fn sellers_only_see_their_own_products() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let first = create_user(&state, Role::Seller, "first@example.com").await?;
    let second = create_user(&state, Role::Seller, "second@example.com").await?;
    let customer = create_user(&state, Role::Customer, "buyer@example.com").await?;

    let created = product_service::create_seller_product(
        &state,
        &first,
        CreateProductRequest {
            name: "Lamp".into(),
            description: None,
            price: Decimal::new(4200, 2),
            image_url: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(created.seller_id, Some(first.user_id));
    assert!(created.is_published);

    let err = product_service::update_seller_product(
        &state,
        &second,
        created.id,
        UpdateProductRequest {
            name: Some("Stolen".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = product_service::create_seller_product(
        &state,
        &customer,
        CreateProductRequest {
            name: "Nope".into(),
            description: None,
            price: Decimal::ONE,
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = product_service::create_seller_product(
        &state,
        &first,
        CreateProductRequest {
            name: "Negative".into(),
            description: None,
            price: Decimal::new(-100, 2),
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let listed = product_service::list_products(
        &state,
        ProductQuery {
            q: Some("lamp".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(listed.items.len(), 1);

    product_service::toggle_publish(&state, &first, created.id).await?;
    let err = product_service::get_product(&state, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let own = product_service::list_seller_products(&state, &first, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(own.items.len(), 1);
    assert!(!own.items[0].is_published);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn simultaneous_shipments_still_roll_up() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let first = create_user(&state, Role::Seller, "first@example.com").await?;
    let second = create_user(&state, Role::Seller, "second@example.com").await?;
    let mug = create_product(&state, &first, "Mug", Decimal::new(1200, 2)).await?;
    let shirt = create_product(&state, &second, "Shirt", Decimal::new(2500, 2)).await?;

    let order = order_service::create_order(&state, &buyer, order_request(&[(mug.id, 1), (shirt.id, 1)]))
        .await?
        .data
        .unwrap()
        .order;
    admin_service::update_order_status(
        &state,
        &admin,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Processing,
        },
    )
    .await?;

    let (a, b) = tokio::join!(
        fulfillment_service::mark_seller_items_shipped(&state, &first, order.id, true),
        fulfillment_service::mark_seller_items_shipped(&state, &second, order.id, true),
    );
    let a = a?.data.unwrap();
    let b = b?.data.unwrap();
    assert!(a.rolled_up ^ b.rolled_up, "exactly one shipment rolls the order up");

    let fetched = order_service::get_order(&state, &buyer, &order.id.to_string())
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.order.status, OrderStatus::Shipped);
    assert!(fetched.items.iter().all(|view| view.item.is_send));

    Ok(())
}

#[tokio::test]
#[serial]
async fn missing_commission_row_reads_as_default() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    state
        .orm
        .execute(Statement::from_string(
            state.orm.get_database_backend(),
            "DELETE FROM settings",
        ))
        .await?;

    let commission = admin_service::get_commission(&state, &admin).await?.data.unwrap();
    assert_eq!(commission.commission, Decimal::TEN);
    assert_eq!(Settings::find().count(&state.orm).await?, 0);

    Ok(())
}

#[tokio::test]
#[serial]
async fn verification_queue_carries_identity_details() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let person = create_user(&state, Role::Customer, "person@example.com").await?;
    let firm = create_user(&state, Role::Customer, "firm@example.com").await?;

    let err = profile_service::request_verification(
        &state,
        &person,
        VerificationRequest {
            seller_type: SellerType::Individual,
            company_name: Some("Not enough".into()),
            inn: Some("7707083893".into()),
            passport_number: None,
            passport_issued_by: None,
            passport_issue_date: None,
            verification_documents: Vec::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let requested = profile_service::request_verification(
        &state,
        &person,
        VerificationRequest {
            seller_type: SellerType::Individual,
            company_name: None,
            inn: None,
            passport_number: Some("4510 123456".into()),
            passport_issued_by: Some("Department 12".into()),
            passport_issue_date: NaiveDate::from_ymd_opt(2015, 6, 1),
            verification_documents: vec!["https://cdn.example.com/passport.jpg".into()],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(requested.verification_status, Some(VerificationStatus::Pending));
    assert_eq!(requested.seller_type, Some(SellerType::Individual));

    profile_service::request_verification(
        &state,
        &firm,
        VerificationRequest {
            seller_type: SellerType::Company,
            company_name: Some("Acme LLC".into()),
            inn: Some("7707083893".into()),
            passport_number: None,
            passport_issued_by: None,
            passport_issue_date: None,
            verification_documents: Vec::new(),
        },
    )
    .await?;

    let queue = admin_service::list_verifications(&state, &admin, Pagination::default())
        .await?
        .data
        .unwrap();
    assert_eq!(queue.items.len(), 2);
    let applicant = queue
        .items
        .iter()
        .find(|u| u.id == person.user_id)
        .expect("individual in queue");
    assert_eq!(applicant.passport_number.as_deref(), Some("4510 123456"));
    assert_eq!(applicant.passport_issued_by.as_deref(), Some("Department 12"));
    assert_eq!(applicant.passport_issue_date, NaiveDate::from_ymd_opt(2015, 6, 1));
    assert_eq!(
        applicant.verification_documents,
        vec!["https://cdn.example.com/passport.jpg".to_string()]
    );
    let company = queue
        .items
        .iter()
        .find(|u| u.id == firm.user_id)
        .expect("company in queue");
    assert_eq!(company.seller_type, Some(SellerType::Company));
    assert_eq!(company.company_name.as_deref(), Some("Acme LLC"));
    assert!(company.verification_documents.is_empty());

    let approved = admin_service::decide_verification(
        &state,
        &admin,
        person.user_id,
        VerificationDecisionRequest {
            action: VerificationAction::Approve,
            rejection_reason: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(approved.role, Role::Seller);
    assert_eq!(approved.passport_number.as_deref(), Some("4510 123456"));

    Ok(())
}

#[tokio::test]
#[serial]
async fn period_stats_compare_windows_and_rank_products() -> anyhow::Result<()> {
    let Some(state) = test_state().await? else {
        return Ok(());
    };

    let admin = create_user(&state, Role::Admin, "admin@example.com").await?;
    let buyer = create_user(&state, Role::Customer, "buyer@example.com").await?;
    let seller = create_user(&state, Role::Seller, "seller@example.com").await?;
    let mug = create_product(&state, &seller, "Mug", Decimal::new(1000, 2)).await?;
    let lamp = create_product(&state, &seller, "Lamp", Decimal::new(5000, 2)).await?;

    let old = order_service::create_order(&state, &buyer, order_request(&[(lamp.id, 1)]))
        .await?
        .data
        .unwrap()
        .order;
    order_service::create_order(&state, &buyer, order_request(&[(mug.id, 3)])).await?;
    order_service::create_order(&state, &buyer, order_request(&[(lamp.id, 1), (mug.id, 1)])).await?;

    // Move the first order into the previous week and all users out of both windows.
    state
        .orm
        .execute(Statement::from_string(
            state.orm.get_database_backend(),
            format!(
                "UPDATE orders SET created_at = NOW() - INTERVAL '10 days' WHERE id = {}",
                old.id
            ),
        ))
        .await?;
    state
        .orm
        .execute(Statement::from_string(
            state.orm.get_database_backend(),
            "UPDATE users SET created_at = NOW() - INTERVAL '30 days'",
        ))
        .await?;
    create_user(&state, Role::Customer, "newcomer@example.com").await?;

    let stats = admin_service::stats(
        &state,
        &admin,
        StatsQuery {
            period: Some(StatsPeriod::Week),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(stats.order_count, 3);
    assert_eq!(stats.total_revenue, Decimal::new(14000, 2));

    let period = stats.period;
    assert_eq!(period.period, StatsPeriod::Week);
    assert_eq!(period.revenue.current, Decimal::new(9000, 2));
    assert_eq!(period.revenue.previous, Decimal::new(5000, 2));
    assert_eq!(period.revenue.change_percent, Decimal::new(80, 0));
    assert_eq!(period.orders.current, Decimal::new(2, 0));
    assert_eq!(period.orders.previous, Decimal::ONE);
    assert_eq!(period.orders.change_percent, Decimal::ONE_HUNDRED);
    assert_eq!(period.average_order_value.current, Decimal::new(4500, 2));
    assert_eq!(period.average_order_value.change_percent, Decimal::new(-10, 0));
    assert_eq!(period.new_users.current, Decimal::ONE);
    assert_eq!(period.new_users.previous, Decimal::ZERO);

    let orders_in_series: i64 = period.orders_by_date.iter().map(|p| p.count).sum();
    assert_eq!(orders_in_series, 2);
    let sales_in_series: Decimal = period.sales_by_date.iter().map(|p| p.amount).sum();
    assert_eq!(sales_in_series, Decimal::new(9000, 2));
    assert!(period.sales_by_date.iter().all(|p| p.date.len() == 10));

    assert_eq!(period.top_products.len(), 2);
    assert_eq!(period.top_products[0].id, lamp.id);
    assert_eq!(period.top_products[0].revenue, Decimal::new(5000, 2));
    assert_eq!(period.top_products[1].id, mug.id);
    assert_eq!(period.top_products[1].quantity, 4);
    assert_eq!(period.top_products[1].revenue, Decimal::new(4000, 2));

    let monthly = admin_service::stats(&state, &admin, StatsQuery::default())
        .await?
        .data
        .unwrap();
    assert_eq!(monthly.period.period, StatsPeriod::Month);
    assert_eq!(monthly.period.orders.current, Decimal::new(3, 0));

    let err = admin_service::stats(&state, &buyer, StatsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}
