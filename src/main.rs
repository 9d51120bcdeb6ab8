use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{TokenConfig, connect_database, run_migrations},
    middlewares::{RateLimiter, authentication},
    modules::{
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

/// Mounts `/api`: register and login are public, everything else needs a bearer token.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").configure(modules::user::route::public_api_configure).service(
            web::scope("")
                .wrap(from_fn(authentication))
                .configure(modules::user::route::configure)
                .configure(modules::friend::route::configure),
        ),
    );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    run_migrations(&db_pool).await.map_err(|e| std::io::Error::other(e.to_string()))?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool.clone()));

    let user_service = UserService::with_dependencies(user_repo.clone(), TokenConfig::from_env());
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo);

    // shared by every worker so the limit holds per process
    let limiter = web::Data::new(RateLimiter::new(ENV.friend_request_rate));

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(limiter.clone())
            .service(health_check)
            .configure(configure_api)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
