use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{
            Commission, DashboardStats, OrdersPoint, PeriodFigure, PeriodStats, RecentUser,
            SalesPoint, StatsPeriod, StatsQuery, TopProduct, UpdateUserRequest, UserList,
            UserListQuery, VerificationAction, VerificationDecisionRequest,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartItemDto, CartList, UpdateCartItemRequest},
        favorites::{AddFavoriteRequest, FavoriteProductList},
        orders::{
            CreateOrderRequest, OrderItemView, OrderLineRequest, OrderList, OrderWithItems,
            SellerOrderList, ShipmentRequest, ShipmentResult, ShippingAddress,
            UpdateOrderStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        profile::{UpdateProfileRequest, VerificationRequest},
        support::{CreateTicketRequest, TicketList},
    },
    models::{
        CartItem, Favorite, Order, OrderItem, OrderStatus, Product, Role, SellerType,
        SupportTicket, User, VerificationStatus,
    },
    response::{Ack, ApiResponse, Meta},
    routes::{
        admin, auth, cart, favorites, health, orders, params, products as product_routes,
        profile, seller, support,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        profile::me,
        profile::update_profile,
        profile::request_verification,
        product_routes::list_products,
        product_routes::get_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::list_favorites,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        seller::list_products,
        seller::create_product,
        seller::get_product,
        seller::update_product,
        seller::delete_product,
        seller::toggle_publish,
        seller::list_orders,
        seller::update_shipment,
        support::create_ticket,
        admin::list_users,
        admin::get_user,
        admin::update_user,
        admin::delete_user,
        admin::list_products,
        admin::get_product,
        admin::update_product,
        admin::delete_product,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::get_commission,
        admin::set_commission,
        admin::list_verifications,
        admin::decide_verification,
        admin::stats,
        admin::list_tickets
    ),
    components(
        schemas(
            User,
            Role,
            VerificationStatus,
            SellerType,
            Product,
            Favorite,
            CartItem,
            Order,
            OrderStatus,
            OrderItem,
            SupportTicket,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            VerificationRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartItemDto,
            CartList,
            AddFavoriteRequest,
            FavoriteProductList,
            ShippingAddress,
            OrderLineRequest,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            ShipmentRequest,
            ShipmentResult,
            OrderItemView,
            OrderWithItems,
            OrderList,
            SellerOrderList,
            CreateTicketRequest,
            TicketList,
            UserListQuery,
            UserList,
            UpdateUserRequest,
            VerificationAction,
            VerificationDecisionRequest,
            Commission,
            RecentUser,
            StatsPeriod,
            StatsQuery,
            PeriodFigure,
            SalesPoint,
            OrdersPoint,
            TopProduct,
            PeriodStats,
            DashboardStats,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            params::SortOrder,
            params::ProductSortBy,
            Ack,
            Meta,
            health::HealthData,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<User>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Profile", description = "Profile and seller verification"),
        (name = "Products", description = "Public catalog"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Seller", description = "Seller products and fulfillment"),
        (name = "Support", description = "Support tickets"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
