use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    use_cases::post::{NewPost, PostChanges, PostProfile, PostRepo, PostWithVotes},
};

const POST_WITH_VOTES_SELECT: &str = r#"SELECT p.id, p.owner_id, p.title, p.content, p.published, p.created_at,
                  COUNT(v.post_id) AS votes
           FROM posts p
           LEFT JOIN votes v ON v.post_id = p.id"#;

#[async_trait]
impl PostRepo for PostgresPersistence {
    async fn create(&self, owner_id: i64, post: &NewPost) -> AppResult<PostProfile> {
        let rec = sqlx::query_as::<_, PostProfile>(
            r#"INSERT INTO posts (owner_id, title, content, published)
               VALUES ($1, $2, $3, $4)
               RETURNING id, owner_id, title, content, published, created_at"#,
        )
        .bind(owner_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<PostProfile>> {
        let rec = sqlx::query_as::<_, PostProfile>(
            r#"SELECT id, owner_id, title, content, published, created_at
               FROM posts
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn get_with_votes(&self, id: i64) -> AppResult<Option<PostWithVotes>> {
        let sql = format!("{POST_WITH_VOTES_SELECT} WHERE p.id = $1 GROUP BY p.id");
        let rec = sqlx::query_as::<_, PostWithVotes>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rec)
    }

    async fn list_with_votes(&self, limit: i64, offset: i64) -> AppResult<Vec<PostWithVotes>> {
        let sql = format!("{POST_WITH_VOTES_SELECT} GROUP BY p.id ORDER BY p.id LIMIT $1 OFFSET $2");
        let recs = sqlx::query_as::<_, PostWithVotes>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(recs)
    }

    async fn update(&self, id: i64, changes: &PostChanges) -> AppResult<PostProfile> {
        let rec = sqlx::query_as::<_, PostProfile>(
            r#"UPDATE posts
               SET title = COALESCE($2, title),
                   content = COALESCE($3, content),
                   published = COALESCE($4, published)
               WHERE id = $1
               RETURNING id, owner_id, title, content, published, created_at"#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.published)
        .fetch_one(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM posts WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
