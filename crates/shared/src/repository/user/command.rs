use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateDoctorRecord, UpdateProfileRequest},
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_doctor(&self, req: &CreateDoctorRecord) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (
                email, password, first_name, last_name, phone,
                license_number, specialty, clinic_name, address, is_approved
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE)
            RETURNING *
            "#,
        )
        .bind(&req.email)
        .bind(&req.password_hash)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.phone)
        .bind(&req.license_number)
        .bind(&req.specialty)
        .bind(&req.clinic_name)
        .bind(&req.address)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create doctor {}: {:?}", req.email, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created doctor ID {} ({})", user.user_id, user.email);
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                phone = $4,
                specialty = $5,
                clinic_name = $6,
                address = $7,
                updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.phone)
        .bind(&req.specialty)
        .bind(&req.clinic_name)
        .bind(&req.address)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update profile of user {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated profile of user ID {}", user.user_id);
        Ok(user)
    }

    async fn set_approval(&self, id: i32, approved: bool) -> Result<UserModel, RepositoryError> {
        let user = sqlx::query_as::<_, UserModel>(
            r#"
            UPDATE users
            SET is_approved = $2,
                approved_at = CASE WHEN $2 THEN current_timestamp ELSE NULL END,
                updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(approved)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to set approval of user {id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!("🩺 User ID {} approval set to {}", user.user_id, user.is_approved);
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete user {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted user ID {id}");
        Ok(())
    }
}
