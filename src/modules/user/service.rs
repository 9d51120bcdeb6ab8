use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::configs::TokenConfig;
use crate::modules::user::model::{AuthResponse, LoginModel, RegisterModel, UserResponse};
use crate::modules::user::schema::UserEntity;
use crate::modules::user::{model::InsertUser, repository::UserRepository};
use crate::utils::{Claims, hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    tokens: TokenConfig,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        tokens: TokenConfig,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, tokens }
    }

    pub async fn register(&self, user: RegisterModel) -> Result<AuthResponse, error::SystemError> {
        let email = user.email.trim().to_string();

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(error::SystemError::bad_request("User with this email already exists"));
        }

        let new_user = InsertUser {
            email,
            name: user.name.unwrap_or_default().trim().to_string(),
            hash_password: hash_password(&user.password)?,
        };

        let entity = self.repo.create(&new_user).await?;
        info!("User {} registered", entity.id);

        self.auth_response(entity)
    }

    /// Returns the user only when the password matches its stored hash.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let Some(user) = self.repo.find_by_email(email.trim()).await? else {
            return Ok(None);
        };

        if verify_password(&user.hash_password, password)? { Ok(Some(user)) } else { Ok(None) }
    }

    pub async fn login(&self, user: LoginModel) -> Result<AuthResponse, error::SystemError> {
        let entity = self
            .authenticate(&user.email, &user.password)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid credentials"))?;

        self.auth_response(entity)
    }

    pub async fn search(
        &self,
        user_id: Uuid,
        query: &str,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.repo.search_users(query.trim(), &user_id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, error::SystemError> {
        Claims::decode(token, self.tokens.secret.as_bytes())
            .map_err(|_| error::SystemError::unauthorized("Token Invalid or Expired"))
    }

    fn auth_response(&self, user: UserEntity) -> Result<AuthResponse, error::SystemError> {
        let token =
            Claims::new(&user.id, self.tokens.expiration).encode(self.tokens.secret.as_bytes())?;
        Ok(AuthResponse { id: user.id, email: user.email, token })
    }
}
