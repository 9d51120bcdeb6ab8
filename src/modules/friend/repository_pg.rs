use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            repository::{FriendRepo, FriendRepository, FriendRequestRepository},
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn are_friends(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM friends WHERE user_id = $1 AND friend_id = $2)",
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError> {
        let friends = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.*
            FROM friends f
            JOIN users u
                ON u.id = f.friend_id
            WHERE f.user_id = $1
            ORDER BY f.created_at, u.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friends)
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for FriendRepositoryPg {
    async fn find_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE from_user_id = $1
              AND to_user_id = $2
              AND status = 'pending'
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        let requests = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE to_user_id = $1
              AND status = 'pending'
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            INSERT INTO friend_requests (id, from_user_id, to_user_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(FriendRequestStatus::Pending)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    async fn reject_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            UPDATE friend_requests
            SET status = $3
            WHERE id = (
                SELECT id
                FROM friend_requests
                WHERE from_user_id = $1
                  AND to_user_id = $2
                  AND status = 'pending'
                ORDER BY created_at, id
                LIMIT 1
                FOR UPDATE
            )
            AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(FriendRequestStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}

#[async_trait::async_trait]
impl FriendRepo for FriendRepositoryPg {
    async fn accept_pending_request_atomic(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let pending = sqlx::query_as::<_, FriendRequestEntity>(
            r#"
            SELECT *
            FROM friend_requests
            WHERE from_user_id = $1
              AND to_user_id = $2
              AND status = 'pending'
            ORDER BY created_at, id
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(pending) = pending else {
            tx.rollback().await?;
            return Ok(None);
        };

        let accepted = sqlx::query_as::<_, FriendRequestEntity>(
            "UPDATE friend_requests SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(pending.id)
        .bind(FriendRequestStatus::Accepted)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO friends (user_id, friend_id)
            VALUES ($1, $2), ($2, $1)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(accepted.from_user_id)
        .bind(accepted.to_user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(accepted))
    }
}
