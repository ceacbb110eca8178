use sqlx::PgPool;

use crate::{error::Result, models::SalesSummary};

pub async fn sales_summary(pool: &PgPool) -> Result<SalesSummary> {
    let summary = sqlx::query_as::<_, SalesSummary>(
        "SELECT COALESCE(SUM(price_paid_in_cents), 0)::BIGINT AS total_paid_in_cents,
                COUNT(*) AS number_of_sales
         FROM orders",
    )
    .fetch_one(pool)
    .await?;

    Ok(summary)
}
