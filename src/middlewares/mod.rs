use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    web,
};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::{api::error, modules::user::service::UserService, utils::Claims};

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let claims = match bearer_claims(&req) {
        Ok(claims) => claims,
        Err(err) => return Ok(req.error_response(err).map_into_right_body()),
    };

    req.extensions_mut().insert(claims);

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

fn bearer_claims(req: &ServiceRequest) -> Result<Claims, error::Error> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| error::Error::unauthorized("Authentication credentials were not provided"))?;

    let user_service = req.app_data::<web::Data<UserService>>().ok_or_else(|| {
        log::error!("UserService is not registered as app data");
        error::Error::internal_server_error()
    })?;

    Ok(user_service.verify_token(token)?)
}

pub fn get_extensions<T: Clone + 'static>(req: &HttpRequest) -> Result<T, error::Error> {
    let extensions = req.extensions();

    let value = extensions
        .get::<T>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(value)
}

/// Fixed-window limiter keyed by user id.
pub struct RateLimiter {
    state: RwLock<HashMap<Uuid, Bucket>>,
    max_per_window: u32,
    window: Duration,
    /// Expired buckets are dropped once the map holds this many entries.
    prune_above: usize,
}

struct Bucket {
    count: u32,
    window_start: Instant,
}

impl RateLimiter {
    /// `0` disables the limit.
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            max_per_window: max_per_minute,
            window: Duration::from_secs(60),
            prune_above: 10_000,
        }
    }

    /// `Err` carries the seconds left until the caller's window resets.
    pub fn check(&self, key: &Uuid) -> Result<(), u64> {
        if self.max_per_window == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());

        if state.len() >= self.prune_above {
            state.retain(|_, b| now.duration_since(b.window_start) < self.window);
        }

        let bucket =
            state.entry(*key).or_insert_with(|| Bucket { count: 0, window_start: now });

        let elapsed = now.duration_since(bucket.window_start);

        if elapsed >= self.window {
            bucket.count = 1;
            bucket.window_start = now;
            return Ok(());
        }

        if bucket.count >= self.max_per_window {
            return Err(self.window.saturating_sub(elapsed).as_secs().max(1));
        }

        bucket.count += 1;
        Ok(())
    }
}

/// Applies the shared [`RateLimiter`] to the authenticated caller. Must run inside
/// [`authentication`]. Without a registered limiter every request passes.
pub async fn throttle_friend_requests<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let verdict = match req.app_data::<web::Data<RateLimiter>>() {
        Some(limiter) => get_extensions::<Claims>(req.request()).and_then(|claims| {
            limiter.check(&claims.sub).map_err(|retry_after| {
                log::warn!("Friend requests from {} throttled", claims.sub);
                error::Error::too_many_requests(retry_after)
            })
        }),
        None => Ok(()),
    };

    if let Err(err) = verdict {
        return Ok(req.error_response(err).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
