use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    use_cases::user::{UserCredentials, UserProfile, UserRepo},
};

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<UserProfile> {
        let rec = sqlx::query_as::<_, UserProfile>(
            r#"INSERT INTO users (email, password_hash)
               VALUES ($1, $2)
               RETURNING id, email, created_at"#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<UserProfile>> {
        let rec = sqlx::query_as::<_, UserProfile>(
            r#"SELECT id, email, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn get_credentials_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let rec = sqlx::query_as::<_, UserCredentials>(
            r#"SELECT id, password_hash FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }
}
