use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, ProductRef, UserRef};

/// Repository trait for Order persistence and the lookups needed to display one
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Orders newest first; restricted to one owner when `user` is set
    async fn list(&self, user: Option<Uuid>) -> OrderResult<Vec<Order>>;

    /// Overwrite a stored order; `NotFound` when absent
    async fn replace(&self, order: Order) -> OrderResult<Order>;

    /// Remove an order; `NotFound` when absent
    async fn delete(&self, id: Uuid) -> OrderResult<()>;

    /// Owner name and email, if the user still exists
    async fn resolve_user(&self, id: Uuid) -> OrderResult<Option<UserRef>>;

    /// Name and image of the products that still exist among `ids`
    async fn resolve_products(&self, ids: Vec<Uuid>) -> OrderResult<Vec<ProductRef>>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
    users: Arc<HashMap<Uuid, UserRef>>,
    products: Arc<HashMap<Uuid, ProductRef>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a user resolvable
    pub fn with_user(mut self, user: UserRef) -> Self {
        Arc::make_mut(&mut self.users).insert(user.id, user);
        self
    }

    /// Make a product resolvable
    pub fn with_product(mut self, product: ProductRef) -> Self {
        Arc::make_mut(&mut self.products).insert(product.id, product);
        self
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list(&self, user: Option<Uuid>) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;

        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| user.is_none_or(|u| o.user == u))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn replace(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(&order.id)
            .ok_or(OrderError::NotFound(order.id))?;
        *stored = order.clone();
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<()> {
        self.orders
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(OrderError::NotFound(id))
    }

    async fn resolve_user(&self, id: Uuid) -> OrderResult<Option<UserRef>> {
        Ok(self.users.get(&id).cloned())
    }

    async fn resolve_products(&self, ids: Vec<Uuid>) -> OrderResult<Vec<ProductRef>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect())
    }
}
