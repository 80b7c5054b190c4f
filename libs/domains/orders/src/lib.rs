//! Orders Domain
//!
//! Order placement by authenticated users, owner-or-admin reads, and
//! admin-managed payment and delivery status.
//!
//! Line items are snapshots: the product name and unit price are copied at
//! placement time and never follow later catalog edits. Only the product's
//! current name and image are looked up when an order is displayed.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_orders::{handlers, MongoOrderRepository, OrderService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoOrderRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!!")?);
//! let router = handlers::router(OrderService::new(repository), jwt);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateOrder, MessageResponse, Order, OrderDetails, OrderItem, PaymentResult, ProductRef,
    Requester, ShippingAddress, UpdateOrderStatus, UserRef,
};
pub use mongodb::MongoOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
