use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::user::schema::UserEntity;

#[derive(Deserialize, Validate)]
pub struct RegisterModel {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters long"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginModel {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct SearchQuery {
    #[serde(default)]
    #[validate(length(max = 255, message = "Search query is too long"))]
    pub search: String,
}

pub struct InsertUser {
    pub email: String,
    pub name: String,
    pub hash_password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse { id: entity.id, email: entity.email, name: entity.name }
    }
}
