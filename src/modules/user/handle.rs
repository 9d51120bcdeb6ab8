use actix_web::{HttpRequest, get, post, web};

use crate::api::{error, success};
use crate::middlewares::get_extensions;
use crate::modules::user::{model, service::UserService};
use crate::utils::{Claims, ValidatedJson, ValidatedQuery};

#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::RegisterModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(response)).message("Registration successful"))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::LoginModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.login(user_data.0).await?;
    Ok(success::Success::ok(Some(response)).message("Login successful"))
}

#[get("/search")]
pub async fn search_users(
    user_service: web::Data<UserService>,
    query: ValidatedQuery<model::SearchQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<model::UserResponse>>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let users = user_service.search(user_id, &query.0.search).await?;
    Ok(success::Success::ok(Some(users)).message("Users retrieved successfully"))
}
