use crate::error::Result;
use crate::models::shortlink::Shortlink;
use crate::utils::token::generate_short_id;
use sqlx::PgPool;
use uuid::Uuid;

pub const SHORT_ID_LENGTH: usize = 6;

#[derive(Clone)]
pub struct ShortlinkService {
    pool: PgPool,
}

impl ShortlinkService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mint a random short id for a listing. No collision retry; at six
    /// alphanumeric characters a clash surfaces as a unique-key violation.
    pub async fn create_for_listing(&self, job_listing_id: Uuid) -> Result<Shortlink> {
        let short_id = generate_short_id(SHORT_ID_LENGTH);
        let link = sqlx::query_as::<_, Shortlink>(
            "INSERT INTO shortlinks (id, job_listing_id) VALUES ($1, $2) \
             RETURNING id, job_listing_id, created_at",
        )
        .bind(&short_id)
        .bind(job_listing_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }
}
