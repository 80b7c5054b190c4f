//! Order Service - Business logic layer

use chrono::Utc;
use observability::ShopMetrics;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderDetails, Requester, UpdateOrderStatus};
use crate::repository::OrderRepository;

/// Client totals further than this from the computed one are logged
const TOTAL_TOLERANCE: f64 = 0.005;

/// Order service: placement, ownership checks and fulfilment state
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Place an order owned by `user_id`. The total is always recomputed.
    #[instrument(skip(self, input), fields(item_count = input.order_items.len()))]
    pub async fn create_order(&self, user_id: Uuid, input: CreateOrder) -> OrderResult<Order> {
        if input.order_items.is_empty() {
            return Err(OrderError::NoItems);
        }
        input.validate()?;

        let order = Order::new(user_id, input.clone());
        if let Some(client_total) = input.total_amount {
            if (client_total - order.total_amount).abs() > TOTAL_TOLERANCE {
                tracing::warn!(
                    client_total,
                    computed_total = order.total_amount,
                    "Client total differs from computed total"
                );
            }
        }

        let order = self.repository.create(order).await?;
        ShopMetrics::record_order_created(order.order_items.len(), order.total_amount);
        Ok(order)
    }

    /// Admins see every order, everyone else only their own
    #[instrument(skip(self))]
    pub async fn list_orders(&self, requester: &Requester) -> OrderResult<Vec<Order>> {
        let owner = (!requester.is_admin).then_some(requester.user_id);
        self.repository.list(owner).await
    }

    /// Fetch one order with owner and products resolved.
    ///
    /// Missing orders are `NotFound` before any ownership check.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid, requester: &Requester) -> OrderResult<OrderDetails> {
        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if !requester.can_access(&order) {
            return Err(OrderError::Forbidden {
                order: id,
                user: requester.user_id,
            });
        }

        let user = self.repository.resolve_user(order.user).await?;
        let product_ids = order.order_items.iter().map(|item| item.product).collect();
        let products = self.repository.resolve_products(product_ids).await?;

        Ok(OrderDetails::resolve(order, user, products))
    }

    #[instrument(skip(self, update))]
    pub async fn update_status(&self, id: Uuid, update: UpdateOrderStatus) -> OrderResult<Order> {
        let mut order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let changed = order.apply_status_update(update, Utc::now());
        let order = self.repository.replace(order).await?;

        for flag in changed {
            tracing::info!(order_id = %id, flag, "Order status changed");
            ShopMetrics::record_order_status_change(flag);
        }
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> OrderResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, ProductRef, ShippingAddress, UserRef};
    use crate::repository::{InMemoryOrderRepository, MockOrderRepository};
    use chrono::Duration;
    use mockall::predicate::eq;

    fn item(product: Uuid, price: f64, quantity: i64) -> OrderItem {
        OrderItem {
            product,
            name: "Snapshot".to_string(),
            price,
            quantity,
        }
    }

    fn input(items: Vec<OrderItem>) -> CreateOrder {
        CreateOrder {
            order_items: items,
            shipping_address: ShippingAddress {
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                postal_code: "12345".to_string(),
                country: "US".to_string(),
            },
            payment_method: "PayPal".to_string(),
            tax_price: 2.0,
            shipping_price: 3.0,
            total_amount: None,
        }
    }

    fn owner(user_id: Uuid) -> Requester {
        Requester {
            user_id,
            is_admin: false,
        }
    }

    fn admin() -> Requester {
        Requester {
            user_id: Uuid::now_v7(),
            is_admin: true,
        }
    }

    #[tokio::test]
    async fn test_create_computes_total_and_ignores_client_value() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        let mut order = input(vec![
            item(Uuid::now_v7(), 10.0, 2),
            item(Uuid::now_v7(), 5.0, 1),
        ]);
        order.total_amount = Some(1.0);

        let created = service.create_order(Uuid::now_v7(), order).await.unwrap();

        assert_eq!(created.total_amount, 30.0);
        assert!(!created.is_paid);
        assert!(created.paid_at.is_none());
    }

    #[tokio::test]
    async fn test_empty_order_never_reaches_repository() {
        let mut mock = MockOrderRepository::new();
        mock.expect_create().never();

        let service = OrderService::new(mock);
        let err = service
            .create_order(Uuid::now_v7(), input(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NoItems));
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_validation_error() {
        let mut mock = MockOrderRepository::new();
        mock.expect_create().never();

        let service = OrderService::new(mock);
        let err = service
            .create_order(Uuid::now_v7(), input(vec![item(Uuid::now_v7(), 1.0, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_scopes_non_admin_to_own_orders() {
        let user_id = Uuid::now_v7();
        let mut mock = MockOrderRepository::new();
        mock.expect_list()
            .with(eq(Some(user_id)))
            .times(1)
            .returning(|_| Ok(vec![]));
        mock.expect_list()
            .with(eq(None::<Uuid>))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = OrderService::new(mock);
        service.list_orders(&owner(user_id)).await.unwrap();
        service.list_orders(&admin()).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryOrderRepository::new();
        let service = OrderService::new(repo.clone());
        let user_id = Uuid::now_v7();

        let mut older = Order::new(user_id, input(vec![item(Uuid::now_v7(), 1.0, 1)]));
        older.created_at -= Duration::days(1);
        repo.create(older.clone()).await.unwrap();
        let newer = service
            .create_order(user_id, input(vec![item(Uuid::now_v7(), 2.0, 1)]))
            .await
            .unwrap();
        service
            .create_order(Uuid::now_v7(), input(vec![item(Uuid::now_v7(), 3.0, 1)]))
            .await
            .unwrap();

        let own = service.list_orders(&owner(user_id)).await.unwrap();
        let ids: Vec<Uuid> = own.iter().map(|o| o.id).collect();
        assert_eq!(ids, [newer.id, older.id]);

        assert_eq!(service.list_orders(&admin()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_order_checks_owner() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        let user_id = Uuid::now_v7();
        let created = service
            .create_order(user_id, input(vec![item(Uuid::now_v7(), 1.0, 1)]))
            .await
            .unwrap();

        assert!(service.get_order(created.id, &owner(user_id)).await.is_ok());
        assert!(service.get_order(created.id, &admin()).await.is_ok());

        let err = service
            .get_order(created.id, &owner(Uuid::now_v7()))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found_before_ownership() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        let err = service
            .get_order(Uuid::now_v7(), &owner(Uuid::now_v7()))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_order_resolves_refs() {
        let user_id = Uuid::now_v7();
        let product_id = Uuid::now_v7();
        let repo = InMemoryOrderRepository::new()
            .with_user(UserRef {
                id: user_id,
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
            })
            .with_product(ProductRef {
                id: product_id,
                name: Some("Kettle".to_string()),
                image: Some("/kettle.png".to_string()),
            });
        let service = OrderService::new(repo);

        let created = service
            .create_order(user_id, input(vec![item(product_id, 10.0, 1)]))
            .await
            .unwrap();
        let details = service.get_order(created.id, &owner(user_id)).await.unwrap();

        assert_eq!(details.user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(details.order_items[0].product.name.as_deref(), Some("Kettle"));
        assert_eq!(details.order_items[0].name, "Snapshot");
    }

    #[tokio::test]
    async fn test_update_status_sets_paid_at_once() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        let created = service
            .create_order(Uuid::now_v7(), input(vec![item(Uuid::now_v7(), 1.0, 1)]))
            .await
            .unwrap();
        let pay = || UpdateOrderStatus {
            is_paid: Some(true),
            ..Default::default()
        };

        let first = service.update_status(created.id, pay()).await.unwrap();
        let second = service.update_status(created.id, pay()).await.unwrap();

        assert!(first.is_paid);
        assert!(first.paid_at.is_some());
        assert!(first.paid_at >= Some(created.created_at));
        assert_eq!(second.paid_at, first.paid_at);
        assert!(!second.is_delivered);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_order() {
        let service = OrderService::new(InMemoryOrderRepository::new());
        let id = Uuid::now_v7();

        let err = service
            .update_status(id, UpdateOrderStatus::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound(found) if found == id));

        let err = service.delete_order(id).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }
}
