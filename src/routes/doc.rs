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
    catalog::{ShopFilter, ShopStockStatus},
    dto::{
        admin::{AdminOrderList, AdminOrderRow, AdminUserList, AdminUserRow, DashboardStats},
        ads::AdList,
        auth::{ChangePasswordRequest, LoginRequest, LoginResponse, SessionView, SignupRequest},
        cart::{AddToCartRequest, CartLine, CartSummary, CartView, UpdateCartItemRequest},
        issues::{IssueList, ReportIssueRequest},
        orders::{CheckoutReceipt, CheckoutRequest, OrderLine, OrderList, PaymentMethod},
        products::{
            AdminProductList, AdminProductRow, HomeSections, ProductCard, ProductList,
            ProductPayload, ReviewRequest,
        },
        profile::ProfileView,
        wishlist::{Wishlist, WishlistToggle},
    },
    models::{Ad, CartItem, Issue, Order, OrderStatus, Product, ProductRef, RecordId, Role, UserView},
    response::{ApiResponse, Meta},
    routes::{
        admin, ads, auth, cart, health, issues, orders, params, products, profile, wishlist,
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
        auth::signup,
        auth::login,
        auth::logout,
        auth::me,
        auth::change_password,
        products::list_products,
        products::home_sections,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::add_review,
        ads::list_ads,
        ads::get_ad,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        orders::checkout,
        orders::list_orders,
        wishlist::list_wishlist,
        wishlist::toggle_wishlist,
        profile::profile,
        issues::report_issue,
        admin::dashboard,
        admin::list_products,
        admin::list_users,
        admin::toggle_user_status,
        admin::delete_user,
        admin::user_orders,
        admin::list_all_orders,
        admin::mark_delivered,
        admin::list_issues,
        admin::mark_issue_fixed,
        admin::delete_issue
    ),
    components(
        schemas(
            RecordId,
            Role,
            UserView,
            Product,
            ProductRef,
            CartItem,
            Order,
            OrderStatus,
            Issue,
            Ad,
            ShopFilter,
            ShopStockStatus,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            SessionView,
            ProductPayload,
            ProductCard,
            ProductList,
            HomeSections,
            ReviewRequest,
            AdminProductRow,
            AdminProductList,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartSummary,
            CartView,
            PaymentMethod,
            CheckoutRequest,
            CheckoutReceipt,
            OrderLine,
            OrderList,
            Wishlist,
            WishlistToggle,
            ProfileView,
            ReportIssueRequest,
            IssueList,
            AdList,
            DashboardStats,
            AdminUserRow,
            AdminUserList,
            AdminOrderRow,
            AdminOrderList,
            health::HealthData,
            params::Pagination,
            params::ProductQuery,
            params::AdminProductQuery,
            Meta,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<OrderList>,
            ApiResponse<AdminOrderList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Signup, login and sessions"),
        (name = "Products", description = "Catalog and reviews"),
        (name = "Ads", description = "Home page banners"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Orders", description = "Checkout and order history"),
        (name = "Wishlist", description = "Saved products"),
        (name = "Profile", description = "Account overview"),
        (name = "Issues", description = "Contact form"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
