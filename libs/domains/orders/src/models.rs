use chrono::{DateTime, Utc};
use database::mongodb::bson_datetime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const FLAG_PAID: &str = "paid";
pub const FLAG_DELIVERED: &str = "delivered";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Round a monetary amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Line-item snapshot: name and unit price as they were when the order was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    /// Catalog product this line refers to
    pub product: Uuid,
    #[validate(custom(function = "not_blank", message = "Item name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[serde(alias = "qty")]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

impl OrderItem {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Address is required"))]
    pub address: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Postal code is required"))]
    pub postal_code: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Country is required"))]
    pub country: String,
}

/// Payment gateway callback data, stored as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Order document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Owning user; fixed at creation
    pub user: Uuid,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_result: Option<PaymentResult>,
    pub tax_price: f64,
    pub shipping_price: f64,
    /// Σ price × quantity + tax + shipping, computed server-side
    pub total_amount: f64,
    pub is_paid: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bson_datetime::option"
    )]
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "bson_datetime::option"
    )]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(with = "bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for placing an order. The owner comes from the bearer token.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[serde(default)]
    #[validate(nested)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Payment method is required"))]
    pub payment_method: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Tax cannot be negative"))]
    pub tax_price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Shipping cannot be negative"))]
    pub shipping_price: f64,
    /// Accepted for compatibility and ignored; the server computes the total
    #[serde(default)]
    pub total_amount: Option<f64>,
}

impl CreateOrder {
    pub fn computed_total(&self) -> f64 {
        let items: f64 = self.order_items.iter().map(OrderItem::subtotal).sum();
        round_cents(items + self.tax_price + self.shipping_price)
    }
}

/// Partial status update. Absent (or `null`) flags leave the order untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatus {
    pub is_paid: Option<bool>,
    pub is_delivered: Option<bool>,
    pub payment_result: Option<PaymentResult>,
}

impl Order {
    pub fn new(user: Uuid, input: CreateOrder) -> Self {
        let now = Utc::now();
        let total_amount = input.computed_total();
        Self {
            id: Uuid::now_v7(),
            user,
            order_items: input.order_items,
            shipping_address: input.shipping_address,
            payment_method: input.payment_method.trim().to_string(),
            payment_result: None,
            tax_price: input.tax_price,
            shipping_price: input.shipping_price,
            total_amount,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a status update at `now`.
    ///
    /// Setting a flag to `true` stamps its timestamp only when none is recorded.
    /// Setting it back to `false` keeps the timestamp. Returns the flags whose
    /// value changed.
    pub fn apply_status_update(
        &mut self,
        update: UpdateOrderStatus,
        now: DateTime<Utc>,
    ) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if let Some(is_paid) = update.is_paid {
            if is_paid != self.is_paid {
                changed.push(FLAG_PAID);
            }
            self.is_paid = is_paid;
            if is_paid && self.paid_at.is_none() {
                self.paid_at = Some(now);
            }
        }

        if let Some(is_delivered) = update.is_delivered {
            if is_delivered != self.is_delivered {
                changed.push(FLAG_DELIVERED);
            }
            self.is_delivered = is_delivered;
            if is_delivered && self.delivered_at.is_none() {
                self.delivered_at = Some(now);
            }
        }

        if let Some(payment_result) = update.payment_result {
            self.payment_result = Some(payment_result);
        }

        self.updated_at = now;
        changed
    }
}

/// Who is asking; derived from the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Requester {
    pub fn can_access(&self, order: &Order) -> bool {
        self.is_admin || order.user == self.user_id
    }
}

/// Display data for an order's owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    /// Reference whose user record no longer exists
    pub fn unresolved(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            email: None,
        }
    }
}

/// Display data for a line item's product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductRef {
    pub fn unresolved(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            image: None,
        }
    }
}

/// Line item with its product resolved; `name` and `price` remain the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDetails {
    pub product: ProductRef,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// Order with user and products resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub user: UserRef,
    pub order_items: Vec<OrderItemDetails>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_result: Option<PaymentResult>,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_amount: f64,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderDetails {
    /// Missing user or product records resolve to bare ids
    pub fn resolve(order: Order, user: Option<UserRef>, products: Vec<ProductRef>) -> Self {
        let products: HashMap<Uuid, ProductRef> =
            products.into_iter().map(|p| (p.id, p)).collect();

        let order_items = order
            .order_items
            .into_iter()
            .map(|item| OrderItemDetails {
                product: products
                    .get(&item.product)
                    .cloned()
                    .unwrap_or_else(|| ProductRef::unresolved(item.product)),
                name: item.name,
                price: item.price,
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: order.id,
            user: user.unwrap_or_else(|| UserRef::unresolved(order.user)),
            order_items,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            payment_result: order.payment_result,
            tax_price: order.tax_price,
            shipping_price: order.shipping_price,
            total_amount: order.total_amount,
            is_paid: order.is_paid,
            paid_at: order.paid_at,
            is_delivered: order.is_delivered,
            delivered_at: order.delivered_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Confirmation body for deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
