//! Rocket read endpoints

use actix_web::web;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::handlers::helpers::require_found;
use crate::models::{ErrorResponse, ListRocketsQuery, RocketResponse};
use crate::services::RocketService;

/// Get the current state of one rocket
#[utoipa::path(
    get,
    path = "/rockets/{id}",
    tag = "Rockets",
    params(
        ("id" = Uuid, Path, description = "Rocket channel")
    ),
    responses(
        (status = 200, description = "Rocket state", body = RocketResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Unknown rocket", body = ErrorResponse)
    )
)]
pub async fn get_rocket(
    service: web::Data<dyn RocketService>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RocketResponse>> {
    let id = path.into_inner();
    let state = require_found(service.get_rocket(id).await?, "rocket", id)?;
    Ok(web::Json(state.into()))
}

/// List all rockets
#[utoipa::path(
    get,
    path = "/rockets",
    tag = "Rockets",
    params(ListRocketsQuery),
    responses(
        (status = 200, description = "Rocket states", body = Vec<RocketResponse>)
    )
)]
pub async fn list_rockets(
    service: web::Data<dyn RocketService>,
    query: web::Query<ListRocketsQuery>,
) -> ApiResult<web::Json<Vec<RocketResponse>>> {
    let rockets = service.list_rockets(query.sort()).await?;
    Ok(web::Json(rockets.into_iter().map(Into::into).collect()))
}
