//! Business counters for the shop backend.

use metrics::{counter, histogram};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Register,
    Login,
}

impl AuthOperation {
    fn as_str(self) -> &'static str {
        match self {
            AuthOperation::Register => "register",
            AuthOperation::Login => "login",
        }
    }
}

/// Shop metrics recorder
pub struct ShopMetrics;

impl ShopMetrics {
    pub fn record_order_created(item_count: usize, total_amount: f64) {
        counter!("orders_created_total").increment(1);
        histogram!("order_value").record(total_amount);

        tracing::debug!(item_count, total_amount, "Recorded order creation");
    }

    /// `flag` is `paid` or `delivered`
    pub fn record_order_status_change(flag: &'static str) {
        counter!("order_status_changes_total", "flag" => flag).increment(1);
    }

    /// `outcome` is a short label such as `success`, `invalid_credentials` or `duplicate`
    pub fn record_auth_attempt(operation: AuthOperation, outcome: &'static str) {
        counter!(
            "auth_attempts_total",
            "operation" => operation.as_str(),
            "outcome" => outcome
        )
        .increment(1);
    }

    /// `outcome` is `sent` or the transport error class
    pub fn record_contact_message(outcome: &'static str) {
        counter!("contact_messages_total", "outcome" => outcome).increment(1);
    }
}
