//! Rocket message intake

use actix_web::{web, HttpResponse};

use crate::domain::RocketEvent;
use crate::error::ApiResult;
use crate::handlers::helpers::validate_request;
use crate::models::{ErrorResponse, RocketMessage};
use crate::services::RocketService;

/// Receive a rocket message
///
/// Duplicates of an already stored `(channel, messageNumber)` are accepted and
/// ignored. Messages may arrive in any order.
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messages",
    request_body = RocketMessage,
    responses(
        (status = 200, description = "Message accepted"),
        (status = 400, description = "Invalid message", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn post_message(
    service: web::Data<dyn RocketService>,
    body: web::Json<RocketMessage>,
) -> ApiResult<HttpResponse> {
    let message = body.into_inner();
    validate_request(&message.metadata)?;

    let event = RocketEvent::try_from(message)?;
    service.receive_message(event).await?;

    Ok(HttpResponse::Ok().finish())
}
