use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    pub product_id: Uuid,
    pub user_id: i32,
    pub price_paid_in_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Aggregate over all orders, used by the dashboard.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
pub struct SalesSummary {
    pub total_paid_in_cents: i64,
    pub number_of_sales: i64,
}
