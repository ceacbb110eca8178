use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{CustomerData, DashboardData, ProductCounts, SalesData},
    queries::{order_queries, product_queries, user_queries},
    AppState,
};

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardData>> {
    let (sales, user_count, (active, inactive)) = tokio::try_join!(
        order_queries::sales_summary(&state.db),
        user_queries::count_users(&state.db),
        product_queries::count_by_availability(&state.db),
    )?;

    let average_value_per_user_in_cents = if user_count == 0 {
        0
    } else {
        sales.total_paid_in_cents / user_count
    };

    Ok(Json(DashboardData {
        sales: SalesData {
            total_paid_in_cents: sales.total_paid_in_cents,
            number_of_sales: sales.number_of_sales,
        },
        customers: CustomerData {
            user_count,
            average_value_per_user_in_cents,
        },
        products: ProductCounts { active, inactive },
    }))
}
