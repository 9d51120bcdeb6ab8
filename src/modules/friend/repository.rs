use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::schema::FriendRequestEntity;
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait FriendRepository {
    async fn are_friends(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    /// Oldest pending request from `sender_id` to `receiver_id`.
    async fn find_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError>;

    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Moves the oldest pending `sender_id -> receiver_id` request to `rejected`.
    /// `None` when there is nothing pending.
    async fn reject_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRepo: FriendRepository + FriendRequestRepository + Send + Sync {
    /// Marks the oldest pending `sender_id -> receiver_id` request as accepted and
    /// records the friendship in both directions, all in one transaction.
    /// `None` (and no change) when there is nothing pending.
    async fn accept_pending_request_atomic(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;
}
