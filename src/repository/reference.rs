//! Categories and writers (read-only reference data)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::category::{Category, Writer},
};

#[derive(Clone)]
pub struct ReferenceRepository {
    pool: Pool<Postgres>,
}

impl ReferenceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn writers(&self) -> AppResult<Vec<Writer>> {
        let writers = sqlx::query_as::<_, Writer>("SELECT * FROM writers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(writers)
    }
}
