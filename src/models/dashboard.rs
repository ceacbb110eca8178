use serde::Serialize;

/// Everything the admin dashboard shows, in one response. All money values
/// are in cents; the UI decides how to format them.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub sales: SalesData,
    pub customers: CustomerData,
    pub products: ProductCounts,
}

#[derive(Debug, Serialize)]
pub struct SalesData {
    pub total_paid_in_cents: i64,
    pub number_of_sales: i64,
}

#[derive(Debug, Serialize)]
pub struct CustomerData {
    pub user_count: i64,
    /// Zero when there are no users yet.
    pub average_value_per_user_in_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct ProductCounts {
    pub active: i64,
    pub inactive: i64,
}
