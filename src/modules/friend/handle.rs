use actix_web::{HttpRequest, get, middleware::from_fn, post, web};

use crate::{
    api::{error, success},
    middlewares::{get_extensions, throttle_friend_requests},
    modules::{
        friend::{
            model::{FriendRequestActionBody, FriendRequestResponse, SendFriendRequestBody},
            service::FriendService,
        },
        user::model::UserResponse,
    },
    utils::{Claims, ValidatedJson},
};

#[post("/friend-requests", wrap = "from_fn(throttle_friend_requests)")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<SendFriendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestResponse>, error::Error> {
    let sender_id = get_extensions::<Claims>(&req)?.sub;
    let request = friend_service.send_friend_request(sender_id, body.0.to_user).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent successfully"))
}

#[post("/friend-requests/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<FriendRequestActionBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestResponse>, error::Error> {
    let receiver_id = get_extensions::<Claims>(&req)?.sub;
    let request = friend_service.accept_friend_request(receiver_id, body.0.user_id).await?;

    Ok(success::Success::ok(Some(request)).message("Friend request accepted successfully"))
}

#[post("/friend-requests/reject")]
pub async fn reject_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<FriendRequestActionBody>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestResponse>, error::Error> {
    let receiver_id = get_extensions::<Claims>(&req)?.sub;
    let request = friend_service.reject_friend_request(receiver_id, body.0.user_id).await?;

    Ok(success::Success::ok(Some(request)).message("Friend request rejected successfully"))
}

#[get("/friend-requests/pending")]
pub async fn list_pending_friend_requests(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let requests = friend_service.get_pending_requests(user_id).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[get("/friends")]
pub async fn list_friends(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}
