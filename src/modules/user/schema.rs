use sqlx::prelude::FromRow;
use uuid::Uuid;

#[allow(unused)]
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub hash_password: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
