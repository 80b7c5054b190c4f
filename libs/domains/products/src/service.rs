//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing catalog operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(Product::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products; the limit is capped at 100
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter.normalized()).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_LIMIT;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use chrono::Duration;
    use mockall::predicate::eq;

    fn input(name: &str, category: &str, featured: bool) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 10.0,
            original_price: None,
            image: "/img.png".to_string(),
            category: category.to_string(),
            quantity: 3,
            rating: 4.5,
            reviews: 2,
            description: format!("{} description", name),
            price_range: None,
            featured,
        }
    }

    #[tokio::test]
    async fn test_list_passes_capped_limit_to_repository() {
        let mut mock = MockProductRepository::new();
        mock.expect_list()
            .withf(|filter| filter.limit == MAX_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock);
        let filter = ProductFilter {
            limit: 500,
            ..Default::default()
        };
        assert!(service.list_products(filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_repository() {
        let mut mock = MockProductRepository::new();
        mock.expect_create().never();

        let service = ProductService::new(mock);
        let mut bad = input("Lamp", "home", false);
        bad.rating = 7.0;

        let err = service.create_product(bad).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let id = Uuid::now_v7();
        let mut mock = MockProductRepository::new();
        mock.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock);
        let err = service.get_product(id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_filters_and_pagination_in_memory() {
        let repo = InMemoryProductRepository::new();
        let service = ProductService::new(repo.clone());

        let mut oldest = Product::new(input("Kettle", "kitchen", true));
        oldest.created_at -= Duration::days(2);
        repo.create(oldest).await.unwrap();
        let mut middle = Product::new(input("Toaster", "kitchen", false));
        middle.created_at -= Duration::days(1);
        repo.create(middle).await.unwrap();
        service
            .create_product(input("Rake", "garden", true))
            .await
            .unwrap();

        let kitchen = service
            .list_products(ProductFilter {
                category: Some("kitchen".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<&str> = kitchen.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Toaster", "Kettle"]);

        let featured = service
            .list_products(ProductFilter {
                featured: Some(true),
                limit: 1,
                offset: 1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].name, "Kettle");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = ProductService::new(InMemoryProductRepository::new());
        let created = service
            .create_product(input("Kettle", "kitchen", false))
            .await
            .unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    quantity: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 0);
        assert_eq!(updated.name, "Kettle");

        service.delete_product(created.id).await.unwrap();
        let err = service.delete_product(created.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }
}
