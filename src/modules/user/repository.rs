use uuid::Uuid;

use crate::{api::error, modules::user::model::InsertUser, modules::user::schema::UserEntity};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    /// Users whose email equals `query` ignoring case, or whose name contains it
    /// ignoring case. `exclude` is never part of the result.
    async fn search_users(
        &self,
        query: &str,
        exclude: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError>;
}
