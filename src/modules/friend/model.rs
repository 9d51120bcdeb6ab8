use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::friend::schema::{FriendRequestEntity, FriendRequestStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub from_user: Uuid,
    pub to_user: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FriendRequestEntity> for FriendRequestResponse {
    fn from(request: FriendRequestEntity) -> Self {
        FriendRequestResponse {
            id: request.id,
            from_user: request.from_user_id,
            to_user: request.to_user_id,
            status: request.status,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendFriendRequestBody {
    pub to_user: Uuid,
}

/// Body of accept and reject: the id of the user who sent the request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendRequestActionBody {
    pub user_id: Uuid,
}
