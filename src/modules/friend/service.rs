use log::info;
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{model::FriendRequestResponse, repository::FriendRepo},
        user::{model::UserResponse, repository::UserRepository},
    },
};

/// Friend-request workflow. Every call takes the acting user explicitly.
#[derive(Clone)]
pub struct FriendService {
    friend_repo: Arc<dyn FriendRepo>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendService {
    pub fn with_dependencies(
        friend_repo: Arc<dyn FriendRepo>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { friend_repo, user_repo }
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let friends = self.friend_repo.find_friends(&user_id).await?;
        Ok(friends.into_iter().map(UserResponse::from).collect())
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendRequestResponse, error::SystemError> {
        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(error::SystemError::bad_request("Invalid target user"));
        }

        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        let (already_friends, pending) = tokio::try_join!(
            self.friend_repo.are_friends(&sender_id, &receiver_id),
            self.friend_repo.find_pending_request(&sender_id, &receiver_id),
        )?;

        if already_friends {
            return Err(error::SystemError::bad_request("Users are already friends"));
        }

        if pending.is_some() {
            return Err(error::SystemError::bad_request("Friend request already exists"));
        }

        let request = self.friend_repo.create_friend_request(&sender_id, &receiver_id).await?;
        info!("Friend request {} sent from {} to {}", request.id, sender_id, receiver_id);

        Ok(FriendRequestResponse::from(request))
    }

    /// `user_id` accepts the pending request sent to them by `sender_id`.
    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        sender_id: Uuid,
    ) -> Result<FriendRequestResponse, error::SystemError> {
        let request = self
            .friend_repo
            .accept_pending_request_atomic(&sender_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::bad_request("Invalid friend request"))?;

        info!("Friend request {} accepted, {} and {} are friends", request.id, sender_id, user_id);
        Ok(FriendRequestResponse::from(request))
    }

    /// `user_id` rejects the pending request sent to them by `sender_id`.
    pub async fn reject_friend_request(
        &self,
        user_id: Uuid,
        sender_id: Uuid,
    ) -> Result<FriendRequestResponse, error::SystemError> {
        let request = self
            .friend_repo
            .reject_pending_request(&sender_id, &user_id)
            .await?
            .ok_or_else(|| error::SystemError::bad_request("Invalid friend request"))?;

        info!("Friend request {} rejected", request.id);
        Ok(FriendRequestResponse::from(request))
    }

    pub async fn get_pending_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        let requests = self.friend_repo.find_pending_requests_to_user(&user_id).await?;
        Ok(requests.into_iter().map(FriendRequestResponse::from).collect())
    }
}
