use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence, app_error::AppResult, use_cases::vote::VoteRepo,
};

#[async_trait]
impl VoteRepo for PostgresPersistence {
    async fn exists(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let found: bool = sqlx::query_scalar(
            r#"SELECT EXISTS (SELECT 1 FROM votes WHERE post_id = $1 AND user_id = $2)"#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn add(&self, post_id: i64, user_id: i64) -> AppResult<()> {
        sqlx::query(r#"INSERT INTO votes (post_id, user_id) VALUES ($1, $2)"#)
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM votes WHERE post_id = $1 AND user_id = $2"#)
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
