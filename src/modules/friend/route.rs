use crate::modules::friend::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(send_friend_request)
        .service(accept_friend_request)
        .service(reject_friend_request)
        .service(list_pending_friend_requests)
        .service(list_friends);
}
