use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{model::InsertUser, repository::UserRepository, schema::UserEntity},
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

fn like_pattern(query: &str) -> String {
    let escaped = query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            "SELECT * FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, name, hash_password)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.hash_password)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn search_users(
        &self,
        query: &str,
        exclude: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users
            WHERE id <> $3
            AND (
                lower(email) = lower($1)
                OR lower(name) LIKE lower($2)
            )
            ORDER BY created_at, id
            "#,
        )
        .bind(query)
        .bind(like_pattern(query))
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
