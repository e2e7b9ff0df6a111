use crate::{
    abstract_trait::ReferralRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateReferralRequest, FindAllReferrals, page_window, search_pattern},
    errors::RepositoryError,
    model::Referral,
    repository::fetch_counted,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ReferralRepository {
    db: ConnectionPool,
}

impl ReferralRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferralRepositoryTrait for ReferralRepository {
    async fn create(
        &self,
        referrer_id: i32,
        req: &CreateReferralRequest,
    ) -> Result<Referral, RepositoryError> {
        let row = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (referrer_id, referred_name, referred_email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(referrer_id)
        .bind(req.referred_name.trim())
        .bind(req.referred_email.trim().to_lowercase())
        .bind(&req.message)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to store referral from user {referrer_id}: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("🤝 User {referrer_id} referred {}", row.referred_email);
        Ok(row)
    }

    async fn find_all(
        &self,
        referrer_id: Option<i32>,
        req: &FindAllReferrals,
    ) -> Result<(Vec<Referral>, i64), RepositoryError> {
        let (limit, offset) = page_window(req.page, req.page_size);

        let search = search_pattern(&req.search);
        let db = &self.db;

        fetch_counted(limit, offset, move |limit, offset| {
            sqlx::query(
                r#"
                SELECT r.*, COUNT(*) OVER() AS total_count
                FROM referrals r
                WHERE ($1::INT IS NULL OR r.referrer_id = $1)
                  AND ($2::TEXT IS NULL
                       OR r.referred_name ILIKE '%' || $2 || '%'
                       OR r.referred_email ILIKE '%' || $2 || '%')
                ORDER BY r.created_at DESC, r.referral_id DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(referrer_id)
            .bind(search.clone())
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
        })
        .await
        .inspect_err(|e| error!("❌ Failed to fetch referrals: {e:?}"))
    }
}
