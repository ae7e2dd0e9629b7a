use super::{assign_ids, FindAllQuery, PostRepository, SortField};
use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;

/// Post store backed by PostgreSQL.
///
/// Each post is one JSONB document. The sortable fields are copied into plain
/// columns next to it, and `seq` records first insertion so that ties sort in
/// storage order.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Applies the schema in `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn order_expression(sort: SortField) -> &'static str {
    // Text columns compare bytewise so the order does not depend on the
    // database locale.
    match sort {
        SortField::Id => r#"id COLLATE "C""#,
        SortField::Title => r#"title COLLATE "C""#,
        SortField::Source => r#"source COLLATE "C""#,
        SortField::Published => "published",
        SortField::Changed => "changed",
        SortField::Status => "status_rank",
    }
}

fn to_i64(value: usize, name: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| AppError::ValidationError(format!("{} is too large", name)))
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn save(&self, post: Post) -> Result<Post> {
        let post = assign_ids(post);
        let id = post
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("post id missing after assignment".to_string()))?;
        let tags = post.tags.clone().unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, source, published, changed, status, status_rank, user_id, tags, document)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title,
                source = EXCLUDED.source,
                published = EXCLUDED.published,
                changed = EXCLUDED.changed,
                status = EXCLUDED.status,
                status_rank = EXCLUDED.status_rank,
                user_id = EXCLUDED.user_id,
                tags = EXCLUDED.tags,
                document = EXCLUDED.document
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.source)
        .bind(post.published)
        .bind(post.changed)
        .bind(post.status.as_str())
        .bind(post.status.rank())
        .bind(&post.user_id)
        .bind(Json(&tags))
        .bind(Json(&post))
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> Result<Post> {
        let row = sqlx::query_as::<_, (Json<Post>,)>("SELECT document FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|(Json(post),)| post)
            .ok_or_else(|| AppError::post_not_found(id))
    }

    async fn find_all(&self, query: &FindAllQuery) -> Result<Vec<Post>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT document FROM posts WHERE TRUE");

        if let Some(user_id) = &query.filter.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.clone());
        }
        if let Some(tag) = &query.filter.tag {
            builder
                .push(" AND tags @> ")
                .push_bind(Json(vec![tag.clone()]));
        }
        if let Some(status) = query.filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }

        builder
            .push(" ORDER BY ")
            .push(order_expression(query.sort))
            .push(if query.desc { " DESC" } else { " ASC" })
            .push(", seq ASC");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(to_i64(limit, "limit")?);
        }
        builder
            .push(" OFFSET ")
            .push_bind(to_i64(query.offset, "offset")?);

        let rows = builder
            .build_query_as::<(Json<Post>,)>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(Json(post),)| post).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::post_not_found(id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM posts").execute(&self.pool).await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>("count") as u64)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
