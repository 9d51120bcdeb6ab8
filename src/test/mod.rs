//! In-memory stand-ins for the PostgreSQL repositories, used by unit and HTTP tests.


use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::api::error;
use crate::configs::TokenConfig;
use crate::modules::friend::repository::{FriendRepo, FriendRepository, FriendRequestRepository};
use crate::modules::friend::schema::{FriendRequestEntity, FriendRequestStatus};
use crate::modules::user::model::InsertUser;
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;

pub fn test_tokens() -> TokenConfig {
    TokenConfig { secret: "test-secret".to_string(), expiration: 3600 }
}

fn new_id() -> Uuid {
    Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext))
}

#[derive(Default)]
struct Inner {
    users: Vec<UserEntity>,
    requests: Vec<FriendRequestEntity>,
    /// Directed edges in insertion order.
    friends: Vec<(Uuid, Uuid)>,
}

impl Inner {
    fn oldest_pending(&mut self, from: &Uuid, to: &Uuid) -> Option<&mut FriendRequestEntity> {
        self.requests.iter_mut().find(|r| {
            r.from_user_id == *from && r.to_user_id == *to && r.status == FriendRequestStatus::Pending
        })
    }

    fn add_edge(&mut self, from: Uuid, to: Uuid) {
        if !self.friends.contains(&(from, to)) {
            self.friends.push((from, to));
        }
    }
}

/// One lock guards every table, so accept is atomic here as well.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn insert_user(&self, email: &str, name: &str) -> Uuid {
        let id = new_id();
        self.inner.write().unwrap().users.push(UserEntity {
            id,
            email: email.to_string(),
            name: name.to_string(),
            hash_password: String::new(),
            created_at: chrono::Utc::now(),
        });
        id
    }

    pub fn user(&self, id: &Uuid) -> Option<UserEntity> {
        self.inner.read().unwrap().users.iter().find(|u| u.id == *id).cloned()
    }

    pub fn request(&self, id: &Uuid) -> Option<FriendRequestEntity> {
        self.inner.read().unwrap().requests.iter().find(|r| r.id == *id).cloned()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let email = email.to_lowercase();
        let inner = self.inner.read().unwrap();
        Ok(inner.users.iter().find(|u| u.email.to_lowercase() == email).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let mut inner = self.inner.write().unwrap();
        let email = user.email.to_lowercase();
        if inner.users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(error::SystemError::Conflict(None));
        }

        let entity = UserEntity {
            id: new_id(),
            email: user.email.clone(),
            name: user.name.clone(),
            hash_password: user.hash_password.clone(),
            created_at: chrono::Utc::now(),
        };
        inner.users.push(entity.clone());
        Ok(entity)
    }

    async fn search_users(
        &self,
        query: &str,
        exclude: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let query = query.to_lowercase();
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.id != *exclude)
            .filter(|u| u.email.to_lowercase() == query || u.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl FriendRepository for MemoryStore {
    async fn are_friends(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        Ok(self.inner.read().unwrap().friends.contains(&(*user_id_a, *user_id_b)))
    }

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .friends
            .iter()
            .filter(|(from, _)| from == user_id)
            .filter_map(|(_, to)| inner.users.iter().find(|u| u.id == *to).cloned())
            .collect())
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for MemoryStore {
    async fn find_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.oldest_pending(sender_id, receiver_id).map(|r| r.clone()))
    }

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .requests
            .iter()
            .filter(|r| r.to_user_id == *user_id && r.status == FriendRequestStatus::Pending)
            .cloned()
            .collect())
    }

    async fn create_friend_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let mut inner = self.inner.write().unwrap();
        if sender_id == receiver_id {
            return Err(error::SystemError::bad_request("Users must be distinct"));
        }
        if inner.oldest_pending(sender_id, receiver_id).is_some() {
            return Err(error::SystemError::Conflict(Some(error::DbErrorMeta {
                constraint: Some("friend_requests_pending_request".to_string()),
            })));
        }

        let request = FriendRequestEntity {
            id: new_id(),
            from_user_id: *sender_id,
            to_user_id: *receiver_id,
            status: FriendRequestStatus::Pending,
            created_at: chrono::Utc::now(),
        };
        inner.requests.push(request.clone());
        Ok(request)
    }

    async fn reject_pending_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let mut inner = self.inner.write().unwrap();
        Ok(inner.oldest_pending(sender_id, receiver_id).map(|r| {
            r.status = FriendRequestStatus::Rejected;
            r.clone()
        }))
    }
}

#[async_trait::async_trait]
impl FriendRepo for MemoryStore {
    async fn accept_pending_request_atomic(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        let mut inner = self.inner.write().unwrap();
        let Some(request) = inner.oldest_pending(sender_id, receiver_id) else {
            return Ok(None);
        };

        request.status = FriendRequestStatus::Accepted;
        let accepted = request.clone();

        inner.add_edge(accepted.from_user_id, accepted.to_user_id);
        inner.add_edge(accepted.to_user_id, accepted.from_user_id);

        Ok(Some(accepted))
    }
}

mod tests {
    use super::*;

    #[actix_web::test]
    async fn friend_requests_follow_the_table_constraints() {
        let store = MemoryStore::default();
        let a = store.insert_user("a@x.com", "A");
        let b = store.insert_user("b@x.com", "B");

        let err = store.create_friend_request(&a, &a).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));

        store.create_friend_request(&a, &b).await.unwrap();
        let err: error::Error = store.create_friend_request(&a, &b).await.unwrap_err().into();
        assert!(matches!(&err, error::Error::Conflict(msg) if msg == "Request already exists"));
    }
}
