//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use database::mongodb::uuid_to_bson;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{FindOneOptions, FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, ProductRef, UserRef};
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository.
///
/// Users and products are read from their own collections for display only.
#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<Order>,
    users: Collection<UserRef>,
    products: Collection<ProductRef>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Order>("orders"),
            users: db.collection::<UserRef>("users"),
            products: db.collection::<ProductRef>("products"),
        }
    }

    /// Initialize indexes for per-user listing and recency sort
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "user": 1, "createdAt": -1 })
                .options(IndexOptions::builder().name("idx_user".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    fn owner_filter(user: Option<Uuid>) -> Document {
        match user {
            Some(user) => doc! { "user": uuid_to_bson(user) },
            None => doc! {},
        }
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_to_bson(id) }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(user_id = %order.user))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;

        tracing::info!(order_id = %order.id, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, user: Option<Uuid>) -> OrderResult<Vec<Order>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .collection
            .find(Self::owner_filter(user))
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn replace(&self, order: Order) -> OrderResult<Order> {
        let result = self
            .collection
            .replace_one(id_filter(order.id), &order)
            .await?;

        if result.matched_count == 0 {
            return Err(OrderError::NotFound(order.id));
        }

        tracing::info!(order_id = %order.id, "Order updated successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> OrderResult<()> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(OrderError::NotFound(id));
        }

        tracing::info!(order_id = %id, "Order deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn resolve_user(&self, id: Uuid) -> OrderResult<Option<UserRef>> {
        let options = FindOneOptions::builder()
            .projection(doc! { "name": 1, "email": 1 })
            .build();

        Ok(self
            .users
            .find_one(id_filter(id))
            .with_options(options)
            .await?)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn resolve_products(&self, ids: Vec<Uuid>) -> OrderResult<Vec<ProductRef>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Bson> = ids.into_iter().map(uuid_to_bson).collect();
        let options = FindOptions::builder()
            .projection(doc! { "name": 1, "image": 1 })
            .build();

        let cursor = self
            .products
            .find(doc! { "_id": { "$in": ids } })
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
